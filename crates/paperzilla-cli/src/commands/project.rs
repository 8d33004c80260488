use std::fmt::Write;

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use paperzilla_core::models::Project;

use crate::utils::{format_optional, format_timestamp, truncate_string, MISSING};

use super::Context;

/// Width of the NAME column in the project table
const NAME_COLUMN_WIDTH: usize = 25;

#[derive(Args, Debug)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: Option<ProjectCommand>,

    /// Project ID to show
    pub id: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List your projects
    List,
}

pub async fn list(ctx: &Context) -> Result<()> {
    let tokens = ctx.authenticate().await?;
    let projects = ctx
        .api
        .fetch_projects(&tokens.access_token)
        .await
        .context("failed to fetch projects")?;

    print!("{}", render_project_list(&projects));
    Ok(())
}

pub async fn show(ctx: &Context, id: &str) -> Result<()> {
    let tokens = ctx.authenticate().await?;
    let project = ctx
        .api
        .fetch_project(&tokens.access_token, id)
        .await
        .context("failed to fetch project")?;

    print!("{}", render_project(&project));
    Ok(())
}

pub fn render_project_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<36}  {:<25}  {:<10}  {:<10}  CREATED",
        "ID", "NAME", "MODE", "VISIBILITY"
    );
    for p in projects {
        let _ = writeln!(
            out,
            "{:<36}  {:<25}  {:<10}  {:<10}  {}",
            p.id,
            truncate_string(&p.name, NAME_COLUMN_WIDTH),
            format_optional(p.mode.as_deref(), ""),
            format_optional(p.visibility.as_deref(), ""),
            format_timestamp(p.created_at.as_deref()),
        );
    }
    out
}

pub fn render_project(p: &Project) -> String {
    let count = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_else(|| MISSING.to_string());

    let mut out = String::new();
    let _ = writeln!(out, "Name:              {}", p.name);
    let _ = writeln!(out, "ID:                {}", p.id);
    let _ = writeln!(out, "Mode:              {}", format_optional(p.mode.as_deref(), MISSING));
    let _ = writeln!(out, "Visibility:        {}", format_optional(p.visibility.as_deref(), MISSING));
    let _ = writeln!(out, "Matching State:    {}", format_optional(p.matching_state.as_deref(), MISSING));
    let _ = writeln!(out, "Email Frequency:   {}", format_optional(p.email_frequency.as_deref(), MISSING));
    let _ = writeln!(out, "Email Time:        {}", format_optional(p.email_time.as_deref(), MISSING));
    let _ = writeln!(out, "Max Candidates:    {}", count(p.max_candidates));
    let _ = writeln!(out, "Max Papers/Digest: {}", count(p.max_papers_per_digest));
    let _ = writeln!(out, "Created:           {}", format_timestamp(p.created_at.as_deref()));
    let _ = writeln!(out, "Activated:         {}", format_timestamp(p.activated_at.as_deref()));
    let _ = writeln!(out, "Last Digest:       {}", format_timestamp(p.last_digest_sent_at.as_deref()));

    if let Some(interest) = p.interest() {
        let _ = write!(out, "\nInterest:\n  {}\n", interest);
    }
    out
}
