use crate::commands::{CmdMessage, CmdResult};
use crate::relink::Relinker;
use crate::settings::Settings;

pub fn run(settings: &Settings, relinker: &dyn Relinker) -> CmdResult {
    let summary = settings.perform_relinking(relinker);

    let mut result = CmdResult::default().modified();
    result.add_message(CmdMessage::success(format!("{} page(s) relinked", summary.moved)));
    if summary.dropped > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} page(s) collided with another page after relinking and were dropped",
            summary.dropped
        )));
    }
    result
}
