//! Requirements command - Print the document checklist per seminar type

use crate::domain::required_documents;
use crate::errors::Result;
use crate::schemas::SeminarType;

pub async fn run(seminar_type: Option<SeminarType>) -> Result<()> {
    let types = match seminar_type {
        Some(seminar_type) => vec![seminar_type],
        None => vec![SeminarType::Proposal, SeminarType::Result],
    };
    for seminar_type in types {
        println!("{}:", seminar_type);
        for (n, requirement) in required_documents(seminar_type).iter().enumerate() {
            println!("  {}. {:<24} {}", n + 1, requirement.id, requirement.display_name);
        }
    }
    Ok(())
}
