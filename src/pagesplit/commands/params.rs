use crate::commands::helpers::apply_with_policy;
use crate::commands::{CmdMessage, CmdResult, PageRecord};
use crate::config::ConflictPolicy;
use crate::error::Result;
use crate::model::{ImageId, Params};
use crate::settings::{Settings, UpdateAction};
use std::fs;
use std::path::Path;

/// Reads params produced by the pipeline from a JSON file.
pub fn read_params_file(path: &Path) -> Result<Params> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Stores computed params for a page.
pub fn set(
    settings: &Settings,
    policy: ConflictPolicy,
    image: &ImageId,
    params: Params,
) -> CmdResult {
    let shape = params.shape();
    let action = UpdateAction::new().set_params(params);
    apply_with_policy(settings, policy, std::slice::from_ref(image), &action, |image| {
        format!("{}: params stored ({:?})", image, shape)
    })
}

/// Forgets computed params, e.g. after the page's geometry changed.
pub fn clear(settings: &Settings, pages: &[ImageId]) -> CmdResult {
    let outcomes = settings.update_pages(pages, &UpdateAction::new().clear_params());

    let mut result = CmdResult::default().modified();
    for (image, outcome) in pages.iter().zip(outcomes) {
        result.add_message(CmdMessage::success(format!("{}: params cleared", image)));
        result.records.push(PageRecord {
            image: image.clone(),
            record: outcome.record,
        });
    }
    result
}
