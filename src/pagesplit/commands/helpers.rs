use crate::commands::{CmdMessage, CmdResult, PageRecord};
use crate::config::ConflictPolicy;
use crate::model::ImageId;
use crate::settings::{Settings, UpdateAction};

/// Applies `action` to each page, handling conflicts per `policy`.
///
/// `done` describes a successful change for the page in the result messages.
pub fn apply_with_policy(
    settings: &Settings,
    policy: ConflictPolicy,
    pages: &[ImageId],
    action: &UpdateAction,
    done: impl Fn(&ImageId) -> String,
) -> CmdResult {
    let mut result = CmdResult::default();

    for image in pages {
        match policy {
            ConflictPolicy::Resolve => {
                let outcome = settings.update_page(image, action);
                if outcome.params_dropped {
                    result.add_message(CmdMessage::warning(format!(
                        "{}: computed params dropped, they do not fit the new layout type",
                        image
                    )));
                } else {
                    result.add_message(CmdMessage::success(done(image)));
                }
                result.records.push(PageRecord {
                    image: image.clone(),
                    record: outcome.record,
                });
                result.modified = true;
            }
            ConflictPolicy::Reject => {
                let outcome = settings.conditional_update(image, action);
                if outcome.conflict {
                    result.add_message(CmdMessage::warning(format!(
                        "{}: left unchanged, the layout type conflicts with its computed params",
                        image
                    )));
                } else {
                    result.add_message(CmdMessage::success(done(image)));
                    result.modified = true;
                }
                result.records.push(PageRecord {
                    image: image.clone(),
                    record: outcome.record,
                });
            }
        }
    }

    result
}
