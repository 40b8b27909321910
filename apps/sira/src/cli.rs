use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use sira::auth::flows::{self, Landing};
use sira::editor::subeditors::{
    apply_personal, parse_comma_list, parse_lines, set_skills, EducationField, ExperienceField,
    PersonalField, ProjectField, VolunteerField,
};
use sira::editor::{EditorState, ListEditor};
use sira::errors::ClientError;
use sira::mapper::SkillBucket;
use sira::models::{JobId, ResumeDocument};
use sira::picker::MonthYearPicker;
use sira::poller::{cache_busted_url, JobPoller, PdfState};
use sira::state::AppState;

use crate::display::{self, ResumeView};

#[derive(Debug, Parser)]
#[command(name = "sira", version, about = "Arabic résumé builder client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and replay any work started before signing in
    Login {
        #[arg(long, env = "SIRA_USERNAME")]
        username: String,
        #[arg(long, env = "SIRA_PASSWORD", hide_env_values = true)]
        password: String,
        /// Page to continue to after sign-in
        #[arg(long)]
        redirect: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SIRA_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Store a token handed back by the social-login callback
    AcceptToken { token: String },
    /// Print the social-login URL
    OauthUrl,
    Logout,
    Whoami,
    Stats,
    Projects,
    DeleteProject { id: String },
    Templates,
    /// Generate a résumé from a free-text description
    Generate {
        prompt: Option<String>,
        /// Read the description from a file
        #[arg(long, conflicts_with = "prompt")]
        file: Option<PathBuf>,
    },
    /// Upload a PDF résumé for field extraction
    Import { pdf: PathBuf },
    /// Save an import parked before sign-in
    FinishImport,
    /// Print a résumé
    Show { job: String },
    /// Write a résumé in editing shape as JSON
    Export {
        job: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Save an edited export and wait for the PDF
    Save {
        job: String,
        file: PathBuf,
        #[arg(long)]
        no_wait: bool,
    },
    /// Job status, optionally waiting for the PDF
    Status {
        job: String,
        #[arg(long)]
        wait: bool,
    },
    /// Set a personal-info field and save
    SetField {
        job: String,
        field: PersonalFieldName,
        value: String,
    },
    /// Replace one skill bucket from a comma-separated list and save
    SetSkills {
        job: String,
        bucket: BucketName,
        values: String,
    },
    /// Append a blank record to a list section and save
    AddEntry { job: String, section: ListSection },
    /// Remove the record at an index and save
    RemoveEntry {
        job: String,
        section: ListSection,
        index: usize,
    },
    /// Set one text field of a record and save
    SetEntry {
        job: String,
        section: ListSection,
        index: usize,
        field: EntryFieldName,
        value: String,
    },
    /// Set a start, end or graduation date through the month/year picker and save
    SetDate {
        job: String,
        section: DatedSection,
        index: usize,
        which: DateEnd,
        /// Month number, 1 to 12
        #[arg(long, required_unless_present = "present")]
        month: Option<usize>,
        #[arg(long, required_unless_present = "present")]
        year: Option<i32>,
        /// Open-ended end or graduation date
        #[arg(long)]
        present: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PersonalFieldName {
    FullName,
    Email,
    Phone,
    Linkedin,
    Github,
    Portfolio,
    Location,
    Summary,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BucketName {
    Technical,
    Tools,
    Soft,
    Certificates,
    Languages,
}

impl From<BucketName> for SkillBucket {
    fn from(bucket: BucketName) -> Self {
        match bucket {
            BucketName::Technical => SkillBucket::TechnicalLanguages,
            BucketName::Tools => SkillBucket::Tools,
            BucketName::Soft => SkillBucket::SoftSkills,
            BucketName::Certificates => SkillBucket::Certifications,
            BucketName::Languages => SkillBucket::SpokenLanguages,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListSection {
    Experience,
    Education,
    Projects,
    Volunteer,
}

/// The text fields `set-entry` understands, across all list sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntryFieldName {
    Company,
    Position,
    Achievements,
    Institution,
    Degree,
    Field,
    Gpa,
    Title,
    Description,
    Technologies,
    Organization,
    Role,
    Location,
    /// Project date, free text.
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatedSection {
    Experience,
    Education,
    Volunteer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DateEnd {
    Start,
    End,
    /// Education only.
    Graduation,
}

impl DateEnd {
    fn allows_present(self) -> bool {
        self != DateEnd::Start
    }
}

pub async fn run(cli: Cli, state: AppState) -> Result<()> {
    match cli.command {
        Command::Login {
            username,
            password,
            redirect,
        } => {
            let landing =
                flows::login_and_resume(&state, &username, &password, redirect.as_deref())
                    .await?;
            print_landing(&landing);
        }
        Command::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let landing =
                flows::register(&state, &username, &email, &password, &confirm_password).await?;
            print_landing(&landing);
        }
        Command::AcceptToken { token } => {
            let landing = flows::accept_callback_token(&state, Some(&token)).await?;
            print_landing(&landing);
        }
        Command::OauthUrl => {
            println!("{}", state.config.social_login_url()?);
        }
        Command::Logout => {
            flows::logout(&state).await?;
            println!("signed out");
        }
        Command::Whoami => match flows::current_user(&state).await? {
            Some(user) => display::print_user(&user),
            None => println!("not signed in"),
        },
        Command::Stats => {
            let stats = state.api.user_stats().await.map_err(ClientError::from)?;
            display::print_stats(&stats);
        }
        Command::Projects => {
            let projects = state
                .api
                .list_projects()
                .await
                .map_err(ClientError::from)?;
            display::print_projects(&projects);
        }
        Command::DeleteProject { id } => {
            state
                .api
                .delete_project(&id)
                .await
                .map_err(ClientError::from)?;
            println!("deleted project {id}");
        }
        Command::Templates => {
            let templates = state
                .api
                .list_templates()
                .await
                .map_err(ClientError::from)?;
            display::print_templates(&templates);
        }
        Command::Generate { prompt, file } => {
            let prompt = match (prompt, file) {
                (Some(prompt), _) => prompt,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => bail!("give a prompt or --file"),
            };
            let landing = flows::generate_or_defer(&state, &prompt).await?;
            print_landing(&landing);
        }
        Command::Import { pdf } => {
            let landing = flows::import_file(&state, &pdf).await?;
            print_landing(&landing);
        }
        Command::FinishImport => {
            let landing = flows::resume_pending_import(&state).await?;
            print_landing(&landing);
        }
        Command::Show { job } => {
            let editor = open_editor(&state, &job).await?;
            show(&editor);
        }
        Command::Export { job, out } => {
            let editor = open_editor(&state, &job).await?;
            let doc = loaded(&editor)?;
            let json = serde_json::to_string_pretty(doc)?;
            match out {
                Some(path) => {
                    tokio::fs::write(&path, json)
                        .await
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("wrote {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Save { job, file, no_wait } => {
            let raw = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let doc: ResumeDocument = serde_json::from_str(&raw)
                .with_context(|| format!("invalid résumé JSON in {}", file.display()))?;
            let mut editor = open_editor(&state, &job).await?;
            editor.load_document(doc);
            save_and_wait(&state, &mut editor, !no_wait).await?;
        }
        Command::Status { job, wait } => {
            let job_id = JobId::from(job);
            if wait {
                report_pdf(&state, &job_id).await;
            } else {
                let status = state
                    .api
                    .job_status(&job_id)
                    .await
                    .map_err(ClientError::from)?;
                println!("{}", status.status.as_str());
                if let Some(url) = status.pdf_url {
                    println!("{url}");
                }
            }
        }
        Command::SetField { job, field, value } => {
            edit_and_save(&state, &job, |doc| {
                apply_personal(doc, personal_field(field, value));
                Ok(())
            })
            .await?;
        }
        Command::SetSkills {
            job,
            bucket,
            values,
        } => {
            edit_and_save(&state, &job, |doc| {
                set_skills(&mut doc.skills, bucket.into(), &values);
                Ok(())
            })
            .await?;
        }
        Command::AddEntry { job, section } => {
            edit_and_save(&state, &job, |doc| {
                match section {
                    ListSection::Experience => ListEditor::new(&mut doc.experience).add(),
                    ListSection::Education => ListEditor::new(&mut doc.education).add(),
                    ListSection::Projects => ListEditor::new(&mut doc.projects).add(),
                    ListSection::Volunteer => ListEditor::new(&mut doc.volunteer_experience).add(),
                };
                Ok(())
            })
            .await?;
        }
        Command::RemoveEntry {
            job,
            section,
            index,
        } => {
            edit_and_save(&state, &job, |doc| {
                let removed = match section {
                    ListSection::Experience => ListEditor::new(&mut doc.experience).remove_at(index),
                    ListSection::Education => ListEditor::new(&mut doc.education).remove_at(index),
                    ListSection::Projects => ListEditor::new(&mut doc.projects).remove_at(index),
                    ListSection::Volunteer => {
                        ListEditor::new(&mut doc.volunteer_experience).remove_at(index)
                    }
                };
                if !removed {
                    bail!("no {section:?} entry at index {index}");
                }
                Ok(())
            })
            .await?;
        }
        Command::SetEntry {
            job,
            section,
            index,
            field,
            value,
        } => {
            edit_and_save(&state, &job, |doc| set_entry(doc, section, index, field, value)).await?;
        }
        Command::SetDate {
            job,
            section,
            index,
            which,
            month,
            year,
            present,
        } => {
            let value = pick_date(which, month, year, present)?;
            edit_and_save(&state, &job, |doc| set_date(doc, section, index, which, value))
                .await?;
        }
    }
    Ok(())
}

fn print_landing(landing: &Landing) {
    match landing {
        Landing::Login { .. } => {
            println!("sign in to continue: sira login --username <name>");
            println!("→ {}", landing.path());
        }
        Landing::Editor(job_id) => {
            println!("→ {}", landing.path());
            println!("job {job_id}");
        }
        _ => println!("→ {}", landing.path()),
    }
}

async fn open_editor(state: &AppState, job: &str) -> Result<EditorState> {
    let mut editor = EditorState::new(JobId::from(job));
    editor.fetch(&state.api).await?;
    Ok(editor)
}

fn loaded(editor: &EditorState) -> Result<&ResumeDocument> {
    editor
        .document()
        .context("résumé has not been loaded")
}

fn show(editor: &EditorState) {
    if let Some(document) = editor.document() {
        display::print_resume(&ResumeView {
            job_id: editor.job_id(),
            document,
            template_id: editor.template_id(),
            pdf_url: editor.pdf_url(),
            sections: &editor.visible_sections(),
        });
    }
}

async fn edit_and_save(
    state: &AppState,
    job: &str,
    edit: impl FnOnce(&mut ResumeDocument) -> Result<()>,
) -> Result<()> {
    let mut editor = open_editor(state, job).await?;
    let doc = editor
        .document_mut()
        .context("résumé has not been loaded")?;
    edit(doc)?;
    save_and_wait(state, &mut editor, false).await
}

async fn save_and_wait(state: &AppState, editor: &mut EditorState, wait: bool) -> Result<()> {
    let outcome = editor.save(&state.api).await?;
    println!("تم حفظ التعديلات!");
    println!("→ {}", outcome.editor_path);
    if outcome.changed {
        info!(job_id = %outcome.job_id, "editor moved to new job");
    }
    if wait {
        report_pdf(state, &outcome.job_id).await;
    }
    Ok(())
}

async fn report_pdf(state: &AppState, job_id: &JobId) {
    let poller = JobPoller::new(Arc::new(state.api.clone()), state.config.poll_interval);
    match poller.wait(job_id).await {
        PdfState::Ready(url) => {
            let millis = chrono::Utc::now().timestamp_millis();
            println!("pdf ready: {}", cache_busted_url(&url, millis));
        }
        PdfState::Failed(message) => eprintln!("pdf failed: {message}"),
        PdfState::Pending => {}
    }
}

fn personal_field(field: PersonalFieldName, value: String) -> PersonalField {
    match field {
        PersonalFieldName::FullName => PersonalField::FullName(value),
        PersonalFieldName::Email => PersonalField::Email(value),
        PersonalFieldName::Phone => PersonalField::Phone(value),
        PersonalFieldName::Linkedin => PersonalField::Linkedin(value),
        PersonalFieldName::Github => PersonalField::Github(value),
        PersonalFieldName::Portfolio => PersonalField::Portfolio(value),
        PersonalFieldName::Location => PersonalField::Location(value),
        PersonalFieldName::Summary => PersonalField::Summary(value),
    }
}

fn optional(value: String) -> Option<String> {
    Some(value).filter(|v| !v.trim().is_empty())
}

fn set_entry(
    doc: &mut ResumeDocument,
    section: ListSection,
    index: usize,
    field: EntryFieldName,
    value: String,
) -> Result<()> {
    use EntryFieldName as F;

    let updated = match section {
        ListSection::Experience => {
            let field = match field {
                F::Company => ExperienceField::Company(value),
                F::Position => ExperienceField::Position(value),
                F::Location => ExperienceField::Location(optional(value)),
                F::Achievements => ExperienceField::Achievements(parse_lines(&value)),
                other => bail!("experience has no field {other:?}"),
            };
            ListEditor::new(&mut doc.experience).update_at(index, field)
        }
        ListSection::Education => {
            let field = match field {
                F::Institution => EducationField::Institution(value),
                F::Degree => EducationField::Degree(value),
                F::Field => EducationField::Field(value),
                F::Gpa => EducationField::Gpa(optional(value)),
                F::Location => EducationField::Location(optional(value)),
                other => bail!("education has no field {other:?}"),
            };
            ListEditor::new(&mut doc.education).update_at(index, field)
        }
        ListSection::Projects => {
            let field = match field {
                F::Title => ProjectField::Title(value),
                F::Description => ProjectField::Description(optional(value)),
                F::Technologies => ProjectField::Technologies(parse_comma_list(&value)),
                F::Date => ProjectField::Date(optional(value)),
                other => bail!("projects have no field {other:?}"),
            };
            ListEditor::new(&mut doc.projects).update_at(index, field)
        }
        ListSection::Volunteer => {
            let field = match field {
                F::Organization => VolunteerField::Organization(value),
                F::Role => VolunteerField::Role(value),
                F::Description => VolunteerField::Description(value),
                other => bail!("volunteering has no field {other:?}"),
            };
            ListEditor::new(&mut doc.volunteer_experience).update_at(index, field)
        }
    };
    if !updated {
        bail!("no {section:?} entry at index {index}");
    }
    Ok(())
}

fn set_date(
    doc: &mut ResumeDocument,
    section: DatedSection,
    index: usize,
    which: DateEnd,
    value: String,
) -> Result<()> {
    let updated = match (section, which) {
        (DatedSection::Experience, DateEnd::Start) => {
            ListEditor::new(&mut doc.experience).update_at(index, ExperienceField::StartDate(value))
        }
        (DatedSection::Experience, DateEnd::End) => ListEditor::new(&mut doc.experience)
            .update_at(index, ExperienceField::EndDate(Some(value))),
        (DatedSection::Education, DateEnd::Graduation) => ListEditor::new(&mut doc.education)
            .update_at(index, EducationField::GraduationDate(value)),
        (DatedSection::Volunteer, DateEnd::Start) => ListEditor::new(&mut doc.volunteer_experience)
            .update_at(index, VolunteerField::StartDate(value)),
        (DatedSection::Volunteer, DateEnd::End) => ListEditor::new(&mut doc.volunteer_experience)
            .update_at(index, VolunteerField::EndDate(value)),
        (DatedSection::Education, other) => bail!("education has a graduation date, not {other:?}"),
        (section, DateEnd::Graduation) => bail!("{section:?} has no graduation date"),
    };
    if !updated {
        bail!("no {section:?} entry at index {index}");
    }
    Ok(())
}

/// Runs the picker the way the editor does: open, pick, confirm.
fn pick_date(
    which: DateEnd,
    month: Option<usize>,
    year: Option<i32>,
    present: bool,
) -> Result<String> {
    let mut picker = MonthYearPicker::new(which.allows_present());
    picker.open("");
    if present {
        return picker
            .choose_present()
            .context("only end and graduation dates can be open-ended");
    }
    let (Some(month), Some(year)) = (month, year) else {
        bail!("give --month and --year, or --present");
    };
    if month == 0 || !picker.select_month(month - 1) {
        bail!("month must be between 1 and 12");
    }
    if !picker.select_year(year) {
        bail!("year {year} is in the future");
    }
    picker.confirm().context("month and year are both required")
}
