use crate::commands::helpers::apply_with_policy;
use crate::commands::{CmdMessage, CmdResult, PageRecord};
use crate::config::ConflictPolicy;
use crate::model::{ImageId, LayoutType};
use crate::settings::{Settings, UpdateAction};

pub fn set(
    settings: &Settings,
    policy: ConflictPolicy,
    pages: &[ImageId],
    layout_type: LayoutType,
) -> CmdResult {
    let action = UpdateAction::new().set_layout_type(layout_type);
    apply_with_policy(settings, policy, pages, &action, |image| {
        format!("{}: layout type set to {}", image, layout_type)
    })
}

/// Removes the layout override so the pages follow the default again.
pub fn clear(settings: &Settings, pages: &[ImageId]) -> CmdResult {
    let action = UpdateAction::new().clear_layout_type();
    let outcomes = settings.update_pages(pages, &action);

    let mut result = CmdResult::default().modified();
    for (image, outcome) in pages.iter().zip(outcomes) {
        if outcome.params_dropped {
            result.add_message(CmdMessage::warning(format!(
                "{}: computed params dropped, they do not fit the default ({})",
                image,
                outcome.record.combined_layout_type()
            )));
        } else {
            result.add_message(CmdMessage::success(format!(
                "{}: following default ({})",
                image,
                outcome.record.combined_layout_type()
            )));
        }
        result.records.push(PageRecord {
            image: image.clone(),
            record: outcome.record,
        });
    }
    result
}
