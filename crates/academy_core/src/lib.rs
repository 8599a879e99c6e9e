pub mod defaults;
pub mod domain;
pub mod ports;
pub mod session;
pub mod settings;

pub use domain::{
    ContactInfo, Course, CourseStatus, Enquiry, EnquiryStatus, Faculty, GalleryItem, HeroContent,
    HistoryEntry, Product, Role, SessionIdentity, SiteStats, Testimonial, UserCredentials,
    UserProfile,
};
pub use ports::{CatalogStore, IdentityStore, PortError, PortResult, SettingsSource};
pub use settings::{Setting, SiteSettings};
