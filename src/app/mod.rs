// Application controller and editing session

mod controller;
mod notice;
mod session;

pub use controller::{
    App, RewriteOutcome, SaveError, SaveOutcome, SavePhase, SaveReport, SaveRequest, SaveTarget,
};
pub use notice::{Notice, NoticeKind};
pub use session::{EditSession, SessionError, SessionState};
