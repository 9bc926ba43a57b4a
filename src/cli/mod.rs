// CLI module
// Command-line surface over the application controller

pub mod commands;
mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "edulog",
    author,
    version,
    about = "에듀로그 (EduLog) - 학생 활동 기록",
    long_about = "학생 활동을 짧게 기록하고, Gemini로 생활기록부 문체로 다듬은 뒤 \
                  새 기록을 구글 시트로 보냅니다.\n\n\
                  Gemini 키는 GEMINI_API_KEY (없으면 API_KEY) 환경 변수에서 읽습니다."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "시트 웹 앱 URL 확인 또는 저장")]
    Settings(commands::SettingsArgs),

    #[command(about = "시트에서 명단 다시 불러오기")]
    Refresh,

    #[command(about = "학급 목록")]
    Classes(commands::ClassesArgs),

    #[command(about = "학급 학생 목록")]
    Students(commands::StudentsArgs),

    #[command(about = "학생 활동 기록하기")]
    Log(commands::LogArgs),

    #[command(about = "저장된 기록 내용 수정")]
    Edit(commands::EditArgs),

    #[command(about = "날짜별 기록 보관소")]
    Records(commands::RecordsArgs),

    #[command(about = "저장하지 않고 문체만 변환")]
    Rewrite(commands::RewriteArgs),

    #[command(about = "시트에 설치할 Apps Script 출력")]
    Script,
}
