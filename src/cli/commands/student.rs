//! Student commands - Progress, registration and document upload

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::output::{lifecycle_line, print_json, seminar_detail};
use crate::cli::{AppContext, StudentCommand};
use crate::domain::result_access;
use crate::errors::{Result, SemproError};
use crate::schemas::{SeminarType, StudentRef};
use crate::workflow::{
    register_research, upload_documents, RegistrationForm, SeminarCache, SubmitGuard, UploadRequest,
};

pub async fn run(config_dir: Option<&Path>, command: StudentCommand) -> Result<()> {
    let mut ctx = AppContext::load(config_dir)?;
    let student = ctx.student()?;
    let me = StudentRef {
        nim: student.nim,
        name: student.name,
    };

    match command {
        StudentCommand::Status { json } => status(&mut ctx, &me, json).await,
        StudentCommand::Register {
            seminar_type,
            title,
            advisors,
        } => {
            let form = RegistrationForm {
                seminar_type,
                title,
                advisor_nips: advisors,
            };
            register(&mut ctx, &me, &form).await
        }
        StudentCommand::Upload {
            seminar_type,
            files,
        } => upload(&mut ctx, &me, seminar_type, files).await,
    }
}

async fn status(ctx: &mut AppContext, me: &StudentRef, json: bool) -> Result<()> {
    let proposal = ctx
        .client
        .get_student_seminar(&mut ctx.session, SeminarType::Proposal, &me.nim)
        .await?;
    let result = ctx
        .client
        .get_student_seminar(&mut ctx.session, SeminarType::Result, &me.nim)
        .await?;

    if json {
        return print_json(&json!({ "proposal": proposal, "result": result }));
    }

    println!("{} ({})", me.name, me.nim);
    println!("{}", lifecycle_line(SeminarType::Proposal, proposal.as_ref()));
    println!("{}", lifecycle_line(SeminarType::Result, result.as_ref()));

    if result.is_none() {
        let access = result_access(proposal.as_ref().map(|p| p.status));
        match access.reason {
            None => println!("Result seminar registration is open"),
            Some(reason) => println!("Result seminar locked: {}", reason),
        }
    }
    for seminar in proposal.iter().chain(result.iter()) {
        println!();
        println!("{}", seminar_detail(seminar));
    }
    Ok(())
}

async fn register(ctx: &mut AppContext, me: &StudentRef, form: &RegistrationForm) -> Result<()> {
    let guard = SubmitGuard::new();
    let mut cache = SeminarCache::new();
    let seminar =
        register_research(&ctx.client, &mut ctx.session, &guard, &mut cache, me, form).await?;
    println!("Research details saved");
    println!("{}", seminar_detail(&seminar));
    Ok(())
}

async fn upload(
    ctx: &mut AppContext,
    me: &StudentRef,
    seminar_type: SeminarType,
    files: Vec<(String, PathBuf)>,
) -> Result<()> {
    let cached = ctx
        .client
        .get_student_seminar(&mut ctx.session, seminar_type, &me.nim)
        .await?
        .ok_or_else(|| {
            SemproError::StateTransition(format!(
                "no {} seminar registered yet, run `sempro student register` first",
                seminar_type
            ))
        })?;
    let requests: Vec<UploadRequest> = files
        .into_iter()
        .map(|(id, path)| UploadRequest::new(id, path))
        .collect();

    let guard = SubmitGuard::new();
    let mut cache = SeminarCache::new();
    let outcome = upload_documents(
        &ctx.client,
        &mut ctx.session,
        &guard,
        &mut cache,
        &cached,
        &requests,
    )
    .await?;
    if outcome.submitted {
        println!("All required documents uploaded; seminar submitted for scheduling");
    } else {
        println!("Uploaded {} document(s)", requests.len());
    }
    println!("{}", seminar_detail(&outcome.seminar));
    Ok(())
}
