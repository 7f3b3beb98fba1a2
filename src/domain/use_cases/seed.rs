use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::{
    entities::{project::ProjectRequest, skill::SkillRequest},
    errors::AppError,
    repositories::{project::ProjectRepository, skill::SkillRepository},
};

pub use crate::entities::seed::SeedOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub projects: SeedOutcome,
    pub skills: SeedOutcome,
}

/// Inserts the sample projects and skills into whichever tables are empty.
pub async fn seed_if_empty(
    projects: &dyn ProjectRepository,
    skills: &dyn SkillRepository,
) -> Result<SeedReport, AppError> {
    Ok(SeedReport {
        projects: seed_projects_if_empty(projects).await?,
        skills: seed_skills_if_empty(skills).await?,
    })
}

/// The emptiness check and the inserts run under one table lock, so
/// concurrent callers seed at most once.
pub async fn seed_projects_if_empty(repo: &dyn ProjectRepository) -> Result<SeedOutcome, AppError> {
    let inserts: Vec<_> = sample_projects().iter().map(ProjectRequest::prepare_for_insert).collect();
    let outcome = repo.seed_projects(&inserts).await?;

    match outcome {
        SeedOutcome::Seeded(n) => info!("Seeded {} projects", n),
        SeedOutcome::Skipped(existing) => info!("Projects already exist ({}), skipping seeding", existing),
    }
    Ok(outcome)
}

pub async fn seed_skills_if_empty(repo: &dyn SkillRepository) -> Result<SeedOutcome, AppError> {
    let inserts: Vec<_> = sample_skills().iter().map(SkillRequest::prepare_for_insert).collect();
    let outcome = repo.seed_skills(&inserts).await?;

    match outcome {
        SeedOutcome::Seeded(n) => info!("Seeded {} skills", n),
        SeedOutcome::Skipped(existing) => info!("Skills already exist ({}), skipping seeding", existing),
    }
    Ok(outcome)
}

fn date(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn sample_projects() -> Vec<ProjectRequest> {
    vec![
        ProjectRequest {
            title: "SmartBank".into(),
            description: "A comprehensive full-stack banking application with role-based access control and secure transactions.".into(),
            long_description: "Engineered a full-stack banking application using Spring Boot and MySQL, which features a robust, Spring Security-based system for role-based access, enabling core banking operations for users and providing comprehensive management tools for administrators. The application includes features like account management, transaction processing, loan management, and real-time notifications.".into(),
            technologies: strings(&["Java", "Spring Boot", "Spring Security", "MySQL", "Thymeleaf", "Bootstrap"]),
            image_url: None,
            github_url: "https://github.com/gouravkumar/smartbank".into(),
            live_url: Some(String::new()),
            featured: true,
            category: "Full Stack".into(),
            date: date(2024, 8),
        },
        ProjectRequest {
            title: "Spring Boot Payment Gateway".into(),
            description: "A multi-faceted payment solution with Razorpay integration and Google OAuth2 authentication.".into(),
            long_description: "Architected a multi-faceted payment solution built on Spring Boot and MySQL, which leverages Razorpay for payment processing and Google OAuth2 for streamlined user access, all managed from a centralized admin dashboard. The system supports multiple payment methods, transaction tracking, and comprehensive reporting features.".into(),
            technologies: strings(&["Java", "Spring Boot", "Razorpay", "Google OAuth2", "MySQL", "REST APIs"]),
            image_url: None,
            github_url: "https://github.com/gouravkumar/payment-gateway".into(),
            live_url: Some(String::new()),
            featured: true,
            category: "Backend".into(),
            date: date(2025, 1),
        },
        ProjectRequest {
            title: "HealthBridge".into(),
            description: "A comprehensive digital healthcare portal connecting patients with top medical professionals.".into(),
            long_description: "Developing a comprehensive digital healthcare portal using Spring Boot and React, designed to streamline appointment booking with top medical professionals. Implementing key modules including a doctor listing, appointment scheduling, medicine search, and a repository of verified health articles, with the goal of providing accessible and reliable medical services to all populations.".into(),
            technologies: strings(&["Java", "Spring Boot", "React", "MySQL", "REST APIs", "JWT"]),
            image_url: None,
            github_url: "https://github.com/Gourav3308/Healthbridge".into(),
            live_url: Some("https://healthbridge-frontend-jj1l.onrender.com/".into()),
            featured: true,
            category: "Full Stack".into(),
            date: date(2025, 4),
        },
    ]
}

pub fn sample_skills() -> Vec<SkillRequest> {
    vec![
        SkillRequest::new("Java", 90, "Languages", "fab fa-java", "#f89820"),
        SkillRequest::new("Spring Boot", 85, "Frameworks", "fas fa-leaf", "#6db33f"),
        SkillRequest::new("React", 80, "Frontend", "fab fa-react", "#61dafb"),
        SkillRequest::new("JavaScript", 85, "Languages", "fab fa-js-square", "#f7df1e"),
        SkillRequest::new("MySQL", 80, "Database", "fas fa-database", "#4479a1"),
        SkillRequest::new("HTML/CSS", 90, "Frontend", "fab fa-html5", "#e34f26"),
        SkillRequest::new("Git", 75, "Tools", "fab fa-git-alt", "#f05032"),
        SkillRequest::new("REST APIs", 85, "Backend", "fas fa-code", "#8b5cf6"),
    ]
}
