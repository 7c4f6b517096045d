use crate::commands::{CmdMessage, CmdResult};
use crate::model::LayoutType;
use crate::settings::Settings;

/// Makes `layout_type` the project-wide default.
pub fn run(settings: &Settings, layout_type: LayoutType) -> CmdResult {
    let removed = settings.set_layout_type_for_all_pages(layout_type);

    let mut result = CmdResult::default().modified();
    result.add_message(CmdMessage::success(format!(
        "Default layout type set to {}",
        layout_type
    )));
    if removed > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} page(s) had params computed for another layout and were reset",
            removed
        )));
    }
    result
}
