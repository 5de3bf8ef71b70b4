//! Lecturer commands - Advised/assessed seminar views and assessment

use std::path::Path;

use chrono::Utc;
use serde_json::json;

use crate::cli::output::{format_time, print_json, seminar_line};
use crate::cli::{AppContext, LecturerCommand, LecturerView};
use crate::domain::{assessment_denial, partition, AssessmentForm, SeminarFilter};
use crate::errors::Result;
use crate::schemas::Seminar;
use crate::workflow::{submit_assessment, SeminarCache, SubmitGuard};

pub async fn run(config_dir: Option<&Path>, command: LecturerCommand) -> Result<()> {
    let mut ctx = AppContext::load(config_dir)?;
    let nip = ctx.lecturer()?.nip;

    match command {
        LecturerCommand::Seminars {
            view,
            search,
            seminar_type,
            json,
        } => {
            let filter = SeminarFilter {
                search,
                seminar_type,
            };
            seminars(&mut ctx, &nip, view, &filter, json).await
        }
        LecturerCommand::Assess {
            id,
            writing,
            presentation,
            title,
            guidance,
            feedback,
        } => {
            let form = AssessmentForm {
                writing_score: writing,
                presentation_score: presentation,
                title_score: title,
                guidance_score: guidance,
                feedback,
            };
            assess(&mut ctx, &nip, id, &form).await
        }
    }
}

fn print_section(title: &str, seminars: &[Seminar], nip: &str) {
    let now = Utc::now();
    println!("{} ({})", title, seminars.len());
    for seminar in seminars {
        let note = match (seminar.time, assessment_denial(seminar, nip, now)) {
            (_, None) => "  <- ready to assess".to_string(),
            (Some(time), Some(_)) => format!("  @ {}", format_time(time)),
            (None, Some(_)) => String::new(),
        };
        println!("  {}{}", seminar_line(seminar), note);
    }
}

async fn seminars(
    ctx: &mut AppContext,
    nip: &str,
    view: LecturerView,
    filter: &SeminarFilter,
    json: bool,
) -> Result<()> {
    let mut cache = SeminarCache::new();
    let all = cache.seminars(&ctx.client, &mut ctx.session).await?;
    let views = partition(all, nip).filter(filter);

    if json {
        return match view {
            LecturerView::Advised => print_json(&views.advised),
            LecturerView::Assessed => print_json(&views.assessed),
            LecturerView::All => {
                print_json(&json!({ "advised": views.advised, "assessed": views.assessed }))
            }
        };
    }

    if view != LecturerView::Assessed {
        print_section("Advised", &views.advised, nip);
    }
    if view != LecturerView::Advised {
        print_section("Assessed", &views.assessed, nip);
    }
    Ok(())
}

async fn assess(ctx: &mut AppContext, nip: &str, id: i64, form: &AssessmentForm) -> Result<()> {
    let mut cache = SeminarCache::new();
    cache.seminars(&ctx.client, &mut ctx.session).await?;
    let seminar = match cache.get(id) {
        Some(seminar) => seminar.clone(),
        None => ctx.client.get_seminar(&mut ctx.session, id).await?,
    };

    let guard = SubmitGuard::new();
    let assessment = submit_assessment(
        &ctx.client,
        &mut ctx.session,
        &guard,
        &mut cache,
        &seminar,
        nip,
        form,
        Utc::now(),
    )
    .await?;

    println!("Assessment recorded for seminar #{}", id);
    if let Some(score) = assessment.final_score {
        println!("final score: {:.2}", score);
    }
    if let Some(refreshed) = cache.get(id) {
        println!("{}", seminar_line(refreshed));
    }
    Ok(())
}
