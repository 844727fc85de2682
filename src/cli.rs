use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::catalog::{CourseFilter, SortKey};
use crate::components::{CourseCard, TagInput};
use crate::config::ClientConfig;
use crate::error::AppError;
use crate::models::{CourseUpdate, Lesson, LessonType, LessonUpdate, Level, Upload};
use crate::pages::{
    CourseDraft, CourseListPage, CourseViewPage, EditCoursePage, EnrolledCoursesPage,
    InstructorDashboard, LessonEditor, LessonFiles, ViewPhase,
};
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "course-catalog", version, about = "Browse and author courses from the terminal")]
pub struct Cli {
    /// Base url of the courses REST API; overrides COURSES_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// SQLite url for client-local state; overrides CATALOG_STORAGE_URL
    #[arg(long, global = true)]
    pub storage_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List courses, filtered and sorted
    List(ListArgs),
    /// Show a course with its lessons
    Show {
        id: String,
        /// Open the lesson at this 1-based position
        #[arg(long)]
        lesson: Option<usize>,
    },
    /// Enroll in a course, unlocking all lessons
    Enroll { id: String },
    /// Courses enrolled from this machine
    Enrolled,
    /// Instructor overview of all courses
    Dashboard,
    /// Create a course
    Create(CreateArgs),
    /// Update a course
    Update(UpdateArgs),
    /// Delete a course
    Delete { id: String },
    /// Ask the backend to generate lesson content for a course
    Generate { id: String },
    /// Manage lessons of a course
    #[command(subcommand)]
    Lesson(LessonCommand),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Matches title or tags, case-insensitively
    #[arg(short, long, default_value = "")]
    pub query: String,
    #[arg(long, default_value = "")]
    pub category: String,
    #[arg(long)]
    pub level: Option<Level>,
    #[arg(long, default_value = "")]
    pub language: String,
    /// Required tag; repeat to require several
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// newest, popular or top-rated
    #[arg(long, default_value = "newest")]
    pub sort: SortKey,
}

impl ListArgs {
    fn into_filter(self) -> CourseFilter {
        let mut filter = CourseFilter {
            query: self.query,
            category: self.category,
            level: self.level,
            language: self.language,
            tags: Vec::new(),
            sort: self.sort,
        };
        for tag in &self.tags {
            if !filter.tags.contains(tag) {
                filter.toggle_tag(tag);
            }
        }
        filter
    }
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, default_value = "")]
    pub category: String,
    #[arg(long)]
    pub duration: String,
    #[arg(long)]
    pub language: String,
    #[arg(long)]
    pub level: Level,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Cover image; switches the request to multipart
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub duration: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub level: Option<Level>,
    /// Replaces the tag list; repeat for several
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

impl UpdateArgs {
    /// Overwrites the draft fields given on the command line; a non-empty
    /// tag list replaces the existing tags.
    fn apply_to(self, draft: &mut CourseUpdate) {
        if self.title.is_some() {
            draft.title = self.title;
        }
        if self.description.is_some() {
            draft.description = self.description;
        }
        if self.category.is_some() {
            draft.category = self.category;
        }
        if self.duration.is_some() {
            draft.duration = self.duration;
        }
        if self.language.is_some() {
            draft.language = self.language;
        }
        if self.level.is_some() {
            draft.level = self.level;
        }
        if !self.tags.is_empty() {
            draft.tags = Some(TagInput::new(self.tags).into_tags());
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum LessonCommand {
    /// List lessons of a course
    List { course_id: String },
    /// Add a lesson, optionally uploading a video and a resource file
    Add(AddLessonArgs),
    /// Update a lesson
    Update(UpdateLessonArgs),
    /// Delete a lesson
    Delete { course_id: String, lesson_id: String },
}

#[derive(Debug, Args)]
pub struct AddLessonArgs {
    pub course_id: String,
    #[arg(long)]
    pub title: String,
    #[arg(long = "type", default_value = "video")]
    pub lesson_type: LessonType,
    #[arg(long, default_value = "")]
    pub duration: String,
    #[arg(long, default_value = "")]
    pub video_url: String,
    #[arg(long, default_value = "")]
    pub resource_url: String,
    #[arg(long, default_value = "")]
    pub quiz_link: String,
    #[arg(long, default_value = "")]
    pub content: String,
    /// Viewable without enrollment
    #[arg(long)]
    pub preview: bool,
    /// Video file to upload after the lesson is created
    #[arg(long)]
    pub video: Option<PathBuf>,
    /// Resource file to upload after the lesson is created
    #[arg(long)]
    pub resource: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct UpdateLessonArgs {
    pub course_id: String,
    pub lesson_id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long = "type")]
    pub lesson_type: Option<LessonType>,
    #[arg(long)]
    pub duration: Option<String>,
    #[arg(long)]
    pub video_url: Option<String>,
    #[arg(long)]
    pub resource_url: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub preview: Option<bool>,
    #[arg(long)]
    pub order: Option<i32>,
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    let config =
        ClientConfig::new_from_env()?.with_overrides(cli.api_url.as_deref(), cli.storage_url)?;
    info!("using backend {}", config.api_url);
    let app = AppState::from_config(&config).await?;

    match cli.command {
        Command::List(args) => list(&app, args).await,
        Command::Show { id, lesson } => show(&app, id, lesson).await,
        Command::Enroll { id } => enroll(&app, id).await,
        Command::Enrolled => enrolled(&app).await,
        Command::Dashboard => dashboard(&app).await,
        Command::Create(args) => create(&app, args).await,
        Command::Update(args) => update(&app, args).await,
        Command::Delete { id } => {
            InstructorDashboard::new().delete(&app, &id).await?;
            println!("Deleted course {}", id);
            Ok(())
        }
        Command::Generate { id } => {
            let lessons = app.api.generate_content(&id).await?;
            println!("Generated {} lessons", lessons.len());
            print_lessons(&lessons, |_| true);
            Ok(())
        }
        Command::Lesson(cmd) => lesson(&app, cmd).await,
    }
}

async fn list(app: &AppState, args: ListArgs) -> Result<(), AppError> {
    let mut page = CourseListPage::new();
    page.filter = args.into_filter();
    page.load(app).await?;

    println!("{} (sorted by {})", page.result_summary(), page.filter.sort);
    for card in page.cards() {
        println!("{}", card);
    }
    if page.filter.is_active() {
        println!();
        println!("languages: {}", page.available_languages().join(", "));
        println!("tags: {}", page.available_tags().join(", "));
    }
    Ok(())
}

async fn show(app: &AppState, id: String, lesson: Option<usize>) -> Result<(), AppError> {
    let mut page = CourseViewPage::new(id);
    page.load(app).await?;

    if let Some(position) = lesson {
        page.select_lesson(position.saturating_sub(1))?;
    }
    print_course_view(&page);
    Ok(())
}

async fn enroll(app: &AppState, id: String) -> Result<(), AppError> {
    let mut page = CourseViewPage::new(id);
    page.load(app).await?;
    page.enroll(app).await?;
    print_course_view(&page);
    Ok(())
}

async fn enrolled(app: &AppState) -> Result<(), AppError> {
    let mut page = EnrolledCoursesPage::new();
    page.load(app).await?;
    if page.courses().is_empty() {
        println!("Not enrolled in any course yet");
    }
    for course in page.courses() {
        println!("{}", CourseCard::from_course(course));
    }
    Ok(())
}

async fn dashboard(app: &AppState) -> Result<(), AppError> {
    let mut page = InstructorDashboard::new();
    page.load(app).await?;
    println!("{} courses", page.courses().len());
    for card in page.cards() {
        println!("{}", card);
    }
    Ok(())
}

async fn create(app: &AppState, args: CreateArgs) -> Result<(), AppError> {
    let image = match &args.image {
        Some(path) => Some(Upload::from_path(path).await?),
        None => None,
    };
    let draft = CourseDraft {
        title: args.title,
        description: args.description,
        category: args.category,
        duration: args.duration,
        language: args.language,
        level: Some(args.level),
        tags: TagInput::new(args.tags),
        image,
    };

    let course = InstructorDashboard::new().create(app, &draft).await?;
    println!("Created course {}", course.id);
    println!("{}", CourseCard::from_course(&course));
    Ok(())
}

async fn update(app: &AppState, args: UpdateArgs) -> Result<(), AppError> {
    let mut page = EditCoursePage::new(args.id.clone());
    page.load(app).await?;

    args.apply_to(&mut page.draft);

    let course = page.submit(app).await?;
    println!("Updated course {}", course.id);
    println!("{}", CourseCard::from_course(&course));
    Ok(())
}

async fn lesson(app: &AppState, cmd: LessonCommand) -> Result<(), AppError> {
    match cmd {
        LessonCommand::List { course_id } => {
            let mut editor = LessonEditor::new(course_id);
            editor.load(app).await?;
            print_lessons(editor.lessons(), |_| true);
        }
        LessonCommand::Add(args) => {
            let mut editor = LessonEditor::new(args.course_id);
            editor.load(app).await?;

            let mut draft = editor.next_draft();
            draft.title = args.title;
            draft.lesson_type = args.lesson_type;
            draft.duration = args.duration;
            draft.video_url = args.video_url;
            draft.resource_url = args.resource_url;
            draft.quiz_link = args.quiz_link;
            draft.content = args.content;
            draft.preview_enabled = args.preview;

            let files = LessonFiles {
                video: match &args.video {
                    Some(path) => Some(Upload::from_path(path).await?),
                    None => None,
                },
                resource: match &args.resource {
                    Some(path) => Some(Upload::from_path(path).await?),
                    None => None,
                },
            };

            let lesson = editor.add(app, &draft, files).await?;
            println!("Added lesson {} ({})", lesson.id, lesson.title);
        }
        LessonCommand::Update(args) => {
            let update = LessonUpdate {
                title: args.title,
                lesson_type: args.lesson_type,
                duration: args.duration,
                video_url: args.video_url,
                resource_url: args.resource_url,
                content: args.content,
                preview_enabled: args.preview,
                order: args.order,
                ..Default::default()
            };
            let lesson = LessonEditor::new(args.course_id)
                .update(app, &args.lesson_id, &update)
                .await?;
            println!("Updated lesson {} ({})", lesson.id, lesson.title);
        }
        LessonCommand::Delete {
            course_id,
            lesson_id,
        } => {
            LessonEditor::new(course_id).remove(app, &lesson_id).await?;
            println!("Deleted lesson {}", lesson_id);
        }
    }
    Ok(())
}

fn print_course_view(page: &CourseViewPage) {
    let Some(loaded) = page.loaded() else {
        if let Some(msg) = page.error() {
            println!("{}", msg);
        }
        return;
    };

    let card = CourseCard::from_course(&loaded.course);
    println!("{}", card);
    println!(
        "students: {} | progress: {}% | {}",
        loaded.student_count,
        page.progress(),
        match page.phase() {
            ViewPhase::LoadedEnrolled => "enrolled",
            _ => "not enrolled",
        }
    );

    for section in page.sections() {
        if section.lessons.is_empty() {
            continue;
        }
        println!();
        println!("{}", section.title);
        for (i, lesson) in section.lessons.iter().enumerate() {
            let index = section.offset + i;
            print_lesson_line(index, lesson, page.is_accessible(index));
        }
    }

    if let Some(active) = page.active_lesson() {
        println!();
        println!("> {}", active.title);
        if let Some(url) = &active.video_url {
            println!("  video: {}", url);
        }
        if let Some(url) = &active.resource_url {
            println!("  resource: {}", url);
        }
        if let Some(body) = &active.content {
            println!("  {}", body);
        }
    }

    if let Some(msg) = page.error() {
        println!();
        println!("! {}", msg);
    }
}

fn print_lessons(lessons: &[Lesson], open: impl Fn(usize) -> bool) {
    for (index, lesson) in lessons.iter().enumerate() {
        print_lesson_line(index, lesson, open(index));
    }
}

fn print_lesson_line(index: usize, lesson: &Lesson, open: bool) {
    println!(
        "  {:>2}. [{}] {} {}{}",
        index + 1,
        lesson.kind(),
        lesson.title,
        lesson.duration.as_deref().unwrap_or(""),
        if open { "" } else { " (locked)" }
    );
}
