// src/workflows.rs

use crate::{
    RunContext,
    downloader::{DownloadManager, ModuleJob},
    error::{AppError, AppResult},
    models::api::{CanvasFile, Course, Module},
    symbols, ui, utils,
};
use colored::*;
use indicatif::HumanBytes;
use itertools::Itertools;
use log::{debug, info, warn};
use std::{collections::HashMap, fs};

fn require_course_id(context: &RunContext) -> AppResult<u64> {
    context
        .args
        .course_id
        .ok_or_else(|| AppError::UserInputError("--course-id is required in this mode".to_string()))
}

fn format_date(value: Option<chrono::DateTime<chrono::FixedOffset>>) -> String {
    value.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d %H:%M %:z").to_string())
}

/// `--check`: verify token/domain access for one course.
pub(crate) async fn run_check(context: &RunContext) -> AppResult<()> {
    let course_id = require_course_id(context)?;
    let course = context.api.get_course(course_id).await?;

    ui::print_header("Connectivity check");
    println!("{} Canvas reachable. Course found:", *symbols::OK);
    println!("  ID:           {}", course.id);
    println!("  Name:         {}", course.name.as_deref().unwrap_or("-"));
    println!("  Course Code:  {}", course.course_code.as_deref().unwrap_or("-"));
    println!("  Workflow:     {}", course.workflow_state.as_deref().unwrap_or("-"));
    println!("  Starts:       {}", format_date(course.start_at));
    println!("  Ends:         {}", format_date(course.end_at));
    Ok(())
}

/// `--list`: read-only overview of modules, module items and course files.
pub(crate) async fn run_listing(context: &RunContext) -> AppResult<()> {
    let course_id = require_course_id(context)?;
    let course = context.api.get_course(course_id).await?;

    ui::print_header("Course listing");
    println!("{} {} (id={})", *symbols::COURSE, course.display_name(), course.id);
    println!(
        "    Code: {} | State: {}",
        course.course_code.as_deref().unwrap_or("-"),
        course.workflow_state.as_deref().unwrap_or("-")
    );

    // --- Modules with items ---
    println!("\n{} with items:", *symbols::MODULES);
    let modules = context.api.list_modules(course_id).await.unwrap_or_else(|e| {
        eprintln!("{} Could not fetch modules: {}", *symbols::ERROR, e);
        Vec::new()
    });
    if modules.is_empty() {
        println!("    (none visible to your account)");
    }
    let limit = context.args.limit_modules;
    for (i, module) in modules.iter().take(limit).enumerate() {
        println!(
            "\n    {:2}. {}  {}",
            i + 1,
            module.name.as_deref().unwrap_or("(unnamed)"),
            format_items_count(module).dimmed()
        );
        let items = context
            .api
            .list_module_items(course_id, module.id)
            .await
            .unwrap_or_else(|e| {
                debug!("Listing items of module {} failed: {}", module.id, e);
                Vec::new()
            });
        for item in items {
            println!(
                "        - {} ({}) {}",
                item.title.as_deref().unwrap_or("(untitled)"),
                item.item_type.as_deref().unwrap_or("?"),
                item.html_url.as_deref().or(item.url.as_deref()).unwrap_or("")
            );
        }
    }
    if modules.len() > limit {
        println!("\n    ... plus {} more", modules.len() - limit);
    }

    // --- Files by folder ---
    println!("\n{} by folder:", *symbols::FILES);
    match list_files_by_folder(context, course_id).await {
        Ok(by_folder) if by_folder.is_empty() => println!("    (no files)"),
        Ok(by_folder) => {
            for folder in by_folder.keys().sorted() {
                println!("  * {}", folder);
                for file in &by_folder[folder] {
                    let name = file
                        .display_name
                        .clone()
                        .or_else(|| file.filename.clone())
                        .unwrap_or_else(|| format!("file_{}", file.id.unwrap_or_default()));
                    println!(
                        "      - {}  [{}]  (updated {})",
                        name,
                        HumanBytes(file.size.unwrap_or(0)),
                        file.updated_at.as_deref().unwrap_or("?")
                    );
                }
            }
        }
        Err(e) if e.is_forbidden() => {
            println!("    (no files or API access to /files is forbidden for your token)")
        }
        Err(e) => eprintln!("    {} Could not fetch files: {}", *symbols::ERROR, e),
    }

    println!("\n(End of listing - no files were downloaded.)");
    Ok(())
}

fn format_items_count(module: &Module) -> String {
    match module.items_count {
        Some(n) => format!("[items: {}]", n),
        None => "[items: ?]".to_string(),
    }
}

/// Folder path relative to the course root, e.g. `course files/Week 1` -> `Week 1`.
pub(crate) fn relative_folder_name(full_name: &str) -> String {
    const PREFIX: &str = "course files/";
    let full = full_name.replace('\\', "/");
    let rel = match full.get(..PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(PREFIX) => &full[PREFIX.len()..],
        _ => full.as_str(),
    };
    let rel = rel.trim_matches('/');
    if rel.is_empty() {
        "(Root)".to_string()
    } else {
        rel.to_string()
    }
}

async fn list_files_by_folder(
    context: &RunContext,
    course_id: u64,
) -> AppResult<HashMap<String, Vec<CanvasFile>>> {
    let folder_names: HashMap<u64, String> = context
        .api
        .list_folders(course_id)
        .await?
        .into_iter()
        .filter_map(|f| Some((f.id?, relative_folder_name(f.full_name.as_deref().unwrap_or("")))))
        .collect();

    let files = context.api.list_course_files(course_id).await?;
    Ok(files.into_iter().into_group_map_by(|file| match file.folder_id {
        Some(id) => folder_names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| "(Unknown folder)".to_string()),
        None => "(Root)".to_string(),
    }))
}

/// Default mode: pick a course and modules, then mirror their files.
pub(crate) async fn run_download(context: &RunContext) -> AppResult<()> {
    let Some(course) = select_course(context).await? else {
        println!("{} {}", *symbols::WARN, "No active courses found for this token.".yellow());
        return Ok(());
    };
    println!(
        "\n{} Selected: {} {}\n",
        *symbols::OK,
        course.display_name(),
        format!("(id={})", course.id).dimmed()
    );

    let modules = context.api.list_modules(course.id).await?;
    if modules.is_empty() {
        println!("{} {}", *symbols::WARN, "No modules are visible in this course.".yellow());
        return Ok(());
    }
    let options: Vec<String> = modules
        .iter()
        .enumerate()
        .map(|(i, m)| {
            format!(
                "{}  {}",
                m.name.clone().unwrap_or_else(|| format!("Module {}", i + 1)),
                format_items_count(m).dimmed()
            )
        })
        .collect();
    ui::numbered_list("Modules:", &options);

    let raw_choices = match &context.args.choices {
        Some(choices) => choices.clone(),
        None => ui::prompt("What would you like to download? (e.g., 8,9,6 or 5-7)", None)
            .map_err(|e| AppError::UserInputError(format!("Could not read module selection: {}", e)))?,
    };
    let choices = utils::parse_selection(&raw_choices, modules.len());
    info!("Selection '{}' -> modules {:?}", raw_choices, choices);
    if choices.is_empty() {
        return Err(AppError::EmptySelection);
    }

    let course_dir = context
        .config
        .output_root
        .join(utils::sanitize_filename(&course.display_name()));
    fs::create_dir_all(&course_dir)?;

    let job = ModuleJob::new(&context.api, course.id, &course_dir, context.config.numbered_dirs);
    let mut manager = DownloadManager::new();
    for ordinal in choices {
        job.run(&modules[ordinal - 1], ordinal, &mut manager).await?;
    }

    manager.print_report();
    if !manager.did_all_succeed() {
        warn!("Run finished with failures");
        println!(
            "{} Some files or modules failed. Run the same command again to retry them.",
            *symbols::WARN
        );
    }
    let shown_dir = dunce::canonicalize(&course_dir).unwrap_or(course_dir);
    println!("Saved under: {}", shown_dir.display().to_string().cyan());
    Ok(())
}

async fn select_course(context: &RunContext) -> AppResult<Option<Course>> {
    if let Some(course_id) = context.args.course_id {
        return context.api.get_course(course_id).await.map(Some);
    }

    let courses = context.api.list_active_courses().await?;
    if courses.is_empty() {
        warn!("No active courses returned for this token");
        return Ok(None);
    }
    let courses: Vec<Course> = courses
        .into_iter()
        .sorted_by_cached_key(|c| c.name.clone().unwrap_or_default().to_lowercase())
        .collect();
    let options: Vec<String> = courses
        .iter()
        .map(|c| {
            let name = c
                .name
                .clone()
                .unwrap_or_else(|| format!("(Unnamed course {})", c.id));
            let code = c.course_code.as_deref().unwrap_or("");
            format!("{} {}", name, format!("[{}]", code).dimmed())
        })
        .collect();
    ui::numbered_list("Your courses:", &options);

    let picked = ui::select_one("Select a course number", courses.len())
        .map_err(|e| AppError::UserInputError(format!("Could not read course selection: {}", e)))?;
    let course_id = courses[picked - 1].id;
    // confirms access; 401/404 end the run
    context.api.get_course(course_id).await.map(Some)
}
