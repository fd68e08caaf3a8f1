//! Duvet recommendations: score a small catalog against questionnaire answers.

pub mod catalog;
pub mod compare;
pub mod config;
pub mod data;
pub mod matcher;
pub mod questionnaire;
