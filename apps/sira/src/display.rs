//! Plain-text cards for résumés, projects and templates.

use sira::editor::SectionId;
use sira::models::job::TemplateSummary;
use sira::models::project::Project;
use sira::models::user::{UserProfile, UserStats};
use sira::models::{JobId, ResumeDocument};

const MAX_LIST_ITEMS: usize = 10;

pub struct ResumeView<'a> {
    pub job_id: &'a JobId,
    pub document: &'a ResumeDocument,
    pub template_id: Option<&'a str>,
    pub pdf_url: Option<&'a str>,
    pub sections: &'a [SectionId],
}

pub fn print_resume(view: &ResumeView<'_>) {
    let doc = view.document;
    println!("=== {} ===", or_dash(&doc.full_name));
    println!("  {:<14} {}", "job", view.job_id);
    if let Some(template) = view.template_id {
        println!("  {:<14} {}", "template", template);
    }
    if let Some(url) = view.pdf_url {
        println!("  {:<14} {}", "pdf", url);
    }
    let tabs: Vec<&str> = view.sections.iter().map(|s| s.label()).collect();
    println!("  {:<14} {}", "sections", tabs.join(" | "));
    println!();

    println!("{}", SectionId::Personal.label());
    let contact = &doc.contact;
    for (label, value) in [
        ("email", &contact.email),
        ("phone", &contact.phone),
        ("linkedin", &contact.linkedin),
        ("github", &contact.github),
        ("portfolio", &contact.portfolio),
        ("location", &contact.location),
        ("summary", &doc.professional_summary),
    ] {
        if let Some(value) = value {
            println!("  {label:<14} {value}");
        }
    }
    println!();

    print_header(SectionId::Experience, doc.experience.len());
    for (i, exp) in doc.experience.values().enumerate().take(MAX_LIST_ITEMS) {
        let end = exp.end_date.as_deref().unwrap_or("");
        println!("  [{i}] {} · {}", or_dash(&exp.position), or_dash(&exp.company));
        println!("      {} - {}", exp.start_date, end);
        for line in &exp.achievements {
            println!("      • {line}");
        }
    }
    print_more(doc.experience.len());

    print_header(SectionId::Education, doc.education.len());
    for (i, edu) in doc.education.values().enumerate().take(MAX_LIST_ITEMS) {
        println!("  [{i}] {} · {}", or_dash(&edu.degree), or_dash(&edu.institution));
        if !edu.field.is_empty() || !edu.graduation_date.is_empty() {
            println!("      {} {}", edu.field, edu.graduation_date);
        }
    }
    print_more(doc.education.len());

    print_header(SectionId::Skills, doc.skills.total());
    let skills = &doc.skills;
    for (label, values) in [
        ("technical", &skills.languages),
        ("tools", &skills.tools),
        ("soft", &skills.soft_skills),
        ("certificates", &skills.platforms),
        ("languages", &skills.spoken_languages),
    ] {
        if !values.is_empty() {
            println!("  {label:<14} {}", values.join(", "));
        }
    }
    println!();

    print_header(SectionId::Projects, doc.projects.len());
    for (i, project) in doc.projects.values().enumerate().take(MAX_LIST_ITEMS) {
        println!("  [{i}] {}", or_dash(&project.title));
        if !project.technologies.is_empty() {
            println!("      {}", project.technologies.join(", "));
        }
    }
    print_more(doc.projects.len());

    if view.sections.contains(&SectionId::Volunteer) {
        print_header(SectionId::Volunteer, doc.volunteer_experience.len());
        for (i, vol) in doc
            .volunteer_experience
            .values()
            .enumerate()
            .take(MAX_LIST_ITEMS)
        {
            println!("  [{i}] {} · {}", or_dash(&vol.role), or_dash(&vol.organization));
            println!("      {} - {}", vol.start_date, vol.end_date);
        }
        print_more(doc.volunteer_experience.len());
    }
}

fn print_header(section: SectionId, count: usize) {
    println!("{} ({count})", section.label());
}

fn print_more(len: usize) {
    if len > MAX_LIST_ITEMS {
        println!("    ... and {} more", len - MAX_LIST_ITEMS);
    }
    println!();
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

pub fn print_projects(projects: &[Project]) {
    if projects.is_empty() {
        println!("no projects yet");
        return;
    }
    for project in projects {
        let job = project
            .latest_job_id
            .as_ref()
            .map(|j| j.short().to_string())
            .unwrap_or_default();
        println!(
            "  {:<8} {:<32} {:<10} {}",
            project.id,
            project.name,
            job,
            project.status_marker()
        );
    }
}

pub fn print_templates(templates: &[TemplateSummary]) {
    for template in templates {
        let premium = if template.is_premium { "★" } else { "" };
        println!(
            "  {:<10} {:<24} {:<14} {:>5.1} {premium}",
            template.id,
            template.name,
            template.category.as_deref().unwrap_or(""),
            template.rating
        );
    }
}

pub fn print_user(user: &UserProfile) {
    println!("  {:<14} {}", "username", user.username);
    println!("  {:<14} {}", "email", user.email);
    if user.is_premium {
        println!("  {:<14} yes", "premium");
    }
}

pub fn print_stats(stats: &UserStats) {
    println!("  {:<16} {}", "total", stats.total_cvs);
    println!("  {:<16} {}", "successful", stats.successful_cvs);
    println!(
        "  {:<16} {}/{}",
        "today", stats.today_count, stats.daily_limit
    );
    println!("  {:<16} {}", "remaining today", stats.remaining_today);
}
