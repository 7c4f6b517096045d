use crate::commands::{CmdMessage, CmdResult, PageRecord};
use crate::model::ImageId;
use crate::settings::{Record, Settings};

/// Records for `pages`, or for every page carrying data when `pages` is empty.
pub fn run(settings: &Settings, pages: &[ImageId]) -> CmdResult {
    let records: Vec<PageRecord> = if pages.is_empty() {
        let (default_layout_type, records) = settings.snapshot();
        records
            .into_iter()
            .map(|(image, base)| PageRecord {
                image,
                record: Record::from_base(base, default_layout_type),
            })
            .collect()
    } else {
        pages
            .iter()
            .map(|image| PageRecord {
                image: image.clone(),
                record: settings.get_page_record(image),
            })
            .collect()
    };

    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No page overrides. Default layout type: {}",
            settings.default_layout_type()
        )));
    }
    result.with_records(records)
}
