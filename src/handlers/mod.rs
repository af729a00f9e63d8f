// src/handlers/mod.rs

pub mod answers;
pub mod participants;
pub mod permissions;
pub mod questions;
pub mod quizzes;
pub mod roles;
pub mod sessions;
pub mod users;
