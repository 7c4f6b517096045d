use crate::commands::{CmdMessage, CmdResult};
use crate::settings::Settings;

pub fn run(settings: &Settings) -> CmdResult {
    let count = settings.len();
    settings.clear();

    let mut result = CmdResult::default().modified();
    result.add_message(CmdMessage::success(format!(
        "Cleared {} page record(s); default layout type is auto",
        count
    )));
    result
}
