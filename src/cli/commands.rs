// Subcommand handlers

use anyhow::{bail, Context, Result};
use clap::Args;

use super::output;
use crate::app::{App, EditSession, RewriteOutcome, SaveOutcome};
use crate::script::{COMPANION_SCRIPT, SETUP_STEPS};

#[derive(Args)]
pub struct SettingsArgs {
    #[arg(long, help = "저장할 시트 웹 앱 URL (빈 문자열이면 삭제)")]
    pub url: Option<String>,
}

#[derive(Args)]
pub struct ClassesArgs {
    #[arg(long, short, help = "이름에 이 문자열이 들어간 학급만 표시")]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct StudentsArgs {
    #[arg(help = "학급 id 또는 이름")]
    pub class: String,
}

#[derive(Args)]
pub struct LogArgs {
    #[arg(help = "학급 id 또는 이름")]
    pub class: String,

    #[arg(help = "학생 번호")]
    pub number: i64,

    #[arg(help = "기록 내용")]
    pub content: String,

    #[arg(long, help = "저장 전에 AI로 문체 변환")]
    pub rewrite: bool,
}

#[derive(Args)]
pub struct EditArgs {
    #[arg(help = "기록 id (겹치지 않는 앞부분만 입력해도 됨)")]
    pub id: String,

    #[arg(help = "새 기록 내용")]
    pub content: String,

    #[arg(long, help = "저장 전에 AI로 문체 변환")]
    pub rewrite: bool,
}

#[derive(Args)]
pub struct RecordsArgs {
    #[arg(long, help = "JSON으로 출력")]
    pub json: bool,
}

#[derive(Args)]
pub struct RewriteArgs {
    #[arg(help = "변환할 기록 내용")]
    pub content: String,
}

pub async fn settings(app: &mut App, args: SettingsArgs) -> Result<()> {
    match args.url {
        Some(url) => {
            let notices = app.save_settings(&url).await;
            output::print_notices(&notices);
        }
        None => match app.sheet_url() {
            Some(url) => println!("{}", url),
            None => println!("시트 URL이 설정되지 않았습니다. 설정 방법은 `edulog script` 를 참고하세요."),
        },
    }
    Ok(())
}

pub async fn refresh(app: &mut App) -> Result<()> {
    if app.sheet_url().is_none() {
        bail!("시트 URL이 설정되지 않았습니다. 먼저 `edulog settings --url <URL>` 을 실행하세요.");
    }
    let notices = app.refresh_roster(None).await;
    output::print_notices(&notices);
    if notices.iter().any(|n| n.is_error()) {
        bail!("명단을 새로 불러오지 못했습니다");
    }
    Ok(())
}

pub async fn classes(app: &mut App, args: ClassesArgs) -> Result<()> {
    load_roster(app).await?;
    let query = args.search.unwrap_or_default();
    print!("{}", output::format_classes(&app.roster().search(&query)));
    Ok(())
}

pub async fn students(app: &mut App, args: StudentsArgs) -> Result<()> {
    load_roster(app).await?;
    let class = app
        .roster()
        .class(&args.class)
        .with_context(|| format!("명단에 '{}' 학급이 없습니다", args.class))?;
    print!("{}", output::format_students(class));
    Ok(())
}

pub async fn log(app: &mut App, args: LogArgs) -> Result<()> {
    load_roster(app).await?;
    let (class_id, student_id) = {
        let class = app
            .roster()
            .class(&args.class)
            .with_context(|| format!("명단에 '{}' 학급이 없습니다", args.class))?;
        let student = class.student_by_number(args.number).with_context(|| {
            format!("'{}' 학급에 {}번 학생이 없습니다", class.name, args.number)
        })?;
        (class.id.clone(), student.id.clone())
    };

    let mut session = EditSession::new_record(class_id, student_id);
    session.set_content(args.content);
    finish_session(app, session, args.rewrite).await
}

pub async fn edit(app: &mut App, args: EditArgs) -> Result<()> {
    let matches: Vec<_> = app
        .records()
        .records()
        .iter()
        .filter(|r| r.id.starts_with(&args.id))
        .collect();
    let record = match matches.as_slice() {
        [record] => *record,
        [] => bail!("'{}' id의 기록이 없습니다", args.id),
        _ => bail!("'{}' 에 해당하는 기록이 {}개입니다. id를 더 입력하세요", args.id, matches.len()),
    };

    let mut session = EditSession::edit(record);
    session.set_content(args.content);
    finish_session(app, session, args.rewrite).await
}

pub fn records(app: &App, args: RecordsArgs) -> Result<()> {
    let groups = app.records().grouped_by_local_day();
    if args.json {
        println!("{}", output::groups_to_json(&groups)?);
    } else {
        print!("{}", output::format_groups(&groups));
    }
    Ok(())
}

pub async fn rewrite(app: &App, args: RewriteArgs) -> Result<()> {
    let status = |s: &str| eprintln!("… {}", s);
    match app.rewrite(&args.content, Some(&status)).await {
        RewriteOutcome::Skipped => bail!("변환할 내용이 없습니다"),
        RewriteOutcome::Rewritten(text) => println!("{}", text),
        RewriteOutcome::Failed(message) => bail!(message),
    }
    Ok(())
}

pub fn script() -> Result<()> {
    eprintln!("{}\n", SETUP_STEPS);
    println!("{}", COMPANION_SCRIPT);
    Ok(())
}

async fn load_roster(app: &mut App) -> Result<()> {
    let notices = app.boot().await;
    if app.sheet_url().is_none() {
        bail!("시트 URL이 설정되지 않았습니다. 먼저 `edulog settings --url <URL>` 을 실행하세요.");
    }
    let failed = notices.iter().any(|n| n.is_error());
    if failed {
        output::print_notices(&notices);
        bail!("명단을 불러오지 못했습니다");
    }
    Ok(())
}

/// Optionally rewrite, then save. A failed rewrite aborts without saving so
/// the raw note can be retried.
async fn finish_session(app: &mut App, mut session: EditSession, rewrite: bool) -> Result<()> {
    if rewrite {
        let raw = session.begin_rewrite()?;
        let status = |s: &str| eprintln!("… {}", s);
        let outcome = app.rewrite(&raw, Some(&status)).await;
        session.finish_rewrite(&outcome);
        if let Some(notice) = outcome.notice() {
            eprintln!("{}", notice);
        }
        if let RewriteOutcome::Failed(_) = outcome {
            bail!("기록을 저장하지 않았습니다");
        }
        println!("{}", session.content());
    }

    let request = session.begin_save()?;
    let report = app.save_record(request).await;
    session.finish_save();
    let report = report?;

    output::print_notices(&report.notices);
    match report.outcome {
        SaveOutcome::Created | SaveOutcome::Updated => println!("{}", report.record_id),
        SaveOutcome::Unchanged => bail!("{} 기록이 더 이상 없습니다", report.record_id),
    }
    Ok(())
}
