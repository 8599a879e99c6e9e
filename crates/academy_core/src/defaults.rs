//! crates/academy_core/src/defaults.rs
//!
//! Hardcoded fallback values for every configurable piece of site content.
//! These are always available: when the remote document for a setting is
//! missing, or a read fails, the site renders these instead of an error.
//! A missing remote FIELD is replaced by its default field-for-field, so
//! every field here must be non-empty.

use crate::domain::{ContactInfo, HeroContent, SiteStats, Testimonial};
use uuid::Uuid;

pub fn contact_info() -> ContactInfo {
    ContactInfo {
        whatsapp_number: "919030200263".to_string(),
        phone: "+91 9030200263".to_string(),
        email: "info@kalanjaliacademy.in, admissions@kalanjaliacademy.in".to_string(),
        address: "Kalanjali Academy of Classical Arts, Road No. 12, Banjara Hills, Hyderabad 500034".to_string(),
        hours: "Mon-Sat: 6:00 AM - 9:00 PM, Sun: 8:00 AM - 12:00 PM".to_string(),
        instagram_url: "https://instagram.com/kalanjaliacademy".to_string(),
        youtube_url: "https://youtube.com/@kalanjaliacademy".to_string(),
        facebook_url: "https://facebook.com/kalanjaliacademy".to_string(),
    }
}

pub fn hero() -> HeroContent {
    HeroContent {
        heading: "Where Tradition Meets Excellence".to_string(),
        subheading: "Classical dance and music training rooted in the guru-shishya parampara".to_string(),
        images: vec![
            "https://res.cloudinary.com/kalanjali/image/upload/v1/site/hero-bharatanatyam.jpg".to_string(),
            "https://res.cloudinary.com/kalanjali/image/upload/v1/site/hero-veena.jpg".to_string(),
            "https://res.cloudinary.com/kalanjali/image/upload/v1/site/hero-stage.jpg".to_string(),
        ],
    }
}

pub fn stats() -> SiteStats {
    SiteStats {
        students_trained: "500+ Students Trained".to_string(),
        years_of_legacy: "25+ Years of Legacy".to_string(),
        art_forms: "6 Classical Art Forms".to_string(),
        performances: "120+ Stage Performances".to_string(),
    }
}

/// Fallback testimonials shown when the collection read fails or is empty.
pub fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            id: Uuid::nil(),
            quote: "My daughter's posture, discipline and love for Bharatanatyam have grown beyond anything we expected.".to_string(),
            name: "Lakshmi R.".to_string(),
            course: "Bharatanatyam".to_string(),
            stars: 5,
            order: 1,
        },
        Testimonial {
            id: Uuid::nil(),
            quote: "The Carnatic vocal classes are rigorous and joyful at the same time. A rare combination.".to_string(),
            name: "Srinivas K.".to_string(),
            course: "Carnatic Vocal".to_string(),
            stars: 5,
            order: 2,
        },
        Testimonial {
            id: Uuid::nil(),
            quote: "Joined as a complete beginner at 34. The teachers meet you where you are.".to_string(),
            name: "Ananya D.".to_string(),
            course: "Veena".to_string(),
            stars: 4,
            order: 3,
        },
    ]
}
