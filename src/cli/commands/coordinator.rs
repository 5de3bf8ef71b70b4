//! Coordinator commands - Seminar overview, scheduling, directories and audit log

use std::path::Path;

use crate::cli::output::{format_time, print_json, seminar_detail, seminar_line};
use crate::cli::{AppContext, CoordinatorCommand};
use crate::domain::SeminarFilter;
use crate::errors::Result;
use crate::schemas::SeminarStatus;
use crate::workflow::{schedule_seminar, ScheduleForm, SeminarCache, SubmitGuard};

pub async fn run(config_dir: Option<&Path>, command: CoordinatorCommand) -> Result<()> {
    let mut ctx = AppContext::load(config_dir)?;
    ctx.coordinator()?;

    match command {
        CoordinatorCommand::Seminars {
            status,
            seminar_type,
            search,
            json,
        } => {
            let filter = SeminarFilter {
                search,
                seminar_type,
            };
            seminars(&mut ctx, status, &filter, json).await
        }
        CoordinatorCommand::Schedule {
            id,
            time,
            room,
            assessors,
        } => {
            let form = ScheduleForm {
                time,
                room,
                assessor_nips: assessors,
            };
            schedule(&mut ctx, id, &form).await
        }
        CoordinatorCommand::Students { nim, json } => {
            let students = match nim {
                Some(nim) => vec![ctx.client.get_student(&mut ctx.session, &nim).await?],
                None => {
                    let mut cache = SeminarCache::new();
                    cache.students(&ctx.client, &mut ctx.session).await?.to_vec()
                }
            };
            if json {
                return print_json(&students);
            }
            for student in &students {
                println!("{:<12} {}", student.nim, student.name);
            }
            Ok(())
        }
        CoordinatorCommand::Lecturers { nip, json } => {
            let lecturers = match nip {
                Some(nip) => vec![ctx.client.get_lecturer(&mut ctx.session, &nip).await?],
                None => {
                    let mut cache = SeminarCache::new();
                    cache.lecturers(&ctx.client, &mut ctx.session).await?.to_vec()
                }
            };
            if json {
                return print_json(&lecturers);
            }
            for lecturer in &lecturers {
                println!("{:<20} {}", lecturer.nip, lecturer.name);
            }
            Ok(())
        }
        CoordinatorCommand::Logs {
            page,
            per_page,
            all,
            json,
        } => {
            let per_page = per_page.unwrap_or(ctx.config.per_page);
            logs(&mut ctx, page, per_page, all, json).await
        }
    }
}

async fn seminars(
    ctx: &mut AppContext,
    status: Option<SeminarStatus>,
    filter: &SeminarFilter,
    json: bool,
) -> Result<()> {
    let mut cache = SeminarCache::new();
    let all = cache.seminars(&ctx.client, &mut ctx.session).await?;
    let shown: Vec<_> = filter
        .apply(all)
        .into_iter()
        .filter(|s| status.map_or(true, |wanted| s.status == wanted))
        .collect();

    if json {
        return print_json(&shown);
    }
    for seminar in &shown {
        println!("{}", seminar_line(seminar));
    }
    let waiting = shown
        .iter()
        .filter(|s| s.status == SeminarStatus::Submitted)
        .count();
    println!("{} seminar(s), {} waiting to be scheduled", shown.len(), waiting);
    Ok(())
}

async fn schedule(ctx: &mut AppContext, id: i64, form: &ScheduleForm) -> Result<()> {
    let mut cache = SeminarCache::new();
    cache.seminars(&ctx.client, &mut ctx.session).await?;
    let seminar = match cache.get(id) {
        Some(seminar) => seminar.clone(),
        None => ctx.client.get_seminar(&mut ctx.session, id).await?,
    };

    let guard = SubmitGuard::new();
    let scheduled = schedule_seminar(
        &ctx.client,
        &mut ctx.session,
        &guard,
        &mut cache,
        &seminar,
        form,
    )
    .await?;
    println!("Seminar scheduled");
    println!("{}", seminar_detail(&scheduled));

    let waiting = cache
        .seminars(&ctx.client, &mut ctx.session)
        .await?
        .iter()
        .filter(|s| s.status == SeminarStatus::Submitted)
        .count();
    println!("{} seminar(s) still waiting to be scheduled", waiting);
    Ok(())
}

async fn logs(ctx: &mut AppContext, page: u32, per_page: u32, all: bool, json: bool) -> Result<()> {
    let logs = ctx
        .client
        .security_logs(&mut ctx.session, page, per_page, all)
        .await?;
    if json {
        return print_json(&logs);
    }

    for entry in &logs.data {
        println!(
            "{}  {:<8} {:<24} {:<12} {}",
            format_time(entry.created_at),
            entry.status,
            entry.action,
            entry.user_id.as_deref().unwrap_or("-"),
            entry.ip_address.as_deref().unwrap_or("-"),
        );
    }
    println!(
        "page {} of {} ({} entries){}",
        logs.page,
        logs.total_pages.max(1),
        logs.total,
        if logs.has_next() { ", use --page for more" } else { "" }
    );
    Ok(())
}
