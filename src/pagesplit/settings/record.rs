use super::action::UpdateAction;
use crate::model::{LayoutType, Params};
use serde::{Deserialize, Serialize};

/// The overrides stored for one page. Either field may be absent; a record
/// with both absent is null and never kept in the store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BaseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    params: Option<Params>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    layout_type: Option<LayoutType>,
}

impl BaseRecord {
    pub fn new(params: Option<Params>, layout_type: Option<LayoutType>) -> Self {
        Self {
            params,
            layout_type,
        }
    }

    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    pub fn layout_type(&self) -> Option<LayoutType> {
        self.layout_type
    }

    pub fn set_params(&mut self, params: Params) {
        self.params = Some(params);
    }

    pub fn set_layout_type(&mut self, layout_type: LayoutType) {
        self.layout_type = Some(layout_type);
    }

    pub fn clear_params(&mut self) {
        self.params = None;
    }

    pub fn clear_layout_type(&mut self) {
        self.layout_type = None;
    }

    pub fn is_null(&self) -> bool {
        self.params.is_none() && self.layout_type.is_none()
    }

    /// Whether `layout_type` contradicts the stored params.
    ///
    /// Params computed for one shape only fit the matching layout type.
    /// Without params there is nothing to contradict, and `Auto` fits
    /// everything.
    pub fn has_layout_type_conflict(&self, layout_type: LayoutType) -> bool {
        let Some(params) = &self.params else {
            return false;
        };
        if layout_type == LayoutType::Auto {
            return false;
        }
        layout_type != params.shape().compatible_layout_type()
    }
}

/// A [`BaseRecord`] resolved against the store's default layout type.
///
/// Records are snapshots: changing one never changes the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    base: BaseRecord,
    default_layout_type: LayoutType,
}

impl Record {
    /// An empty record over `default_layout_type`.
    pub fn new(default_layout_type: LayoutType) -> Self {
        Self::from_base(BaseRecord::default(), default_layout_type)
    }

    pub fn from_base(base: BaseRecord, default_layout_type: LayoutType) -> Self {
        Self {
            base,
            default_layout_type,
        }
    }

    pub fn base(&self) -> &BaseRecord {
        &self.base
    }

    pub fn params(&self) -> Option<&Params> {
        self.base.params()
    }

    /// The explicit override, if any. See [`Record::combined_layout_type`].
    pub fn layout_type(&self) -> Option<LayoutType> {
        self.base.layout_type()
    }

    pub fn default_layout_type(&self) -> LayoutType {
        self.default_layout_type
    }

    /// The layout type in effect: the override if present, the default otherwise.
    pub fn combined_layout_type(&self) -> LayoutType {
        self.base.layout_type().unwrap_or(self.default_layout_type)
    }

    pub fn is_null(&self) -> bool {
        self.base.is_null()
    }

    /// Conflict check against the effective layout type, so a page without an
    /// override still conflicts when the default no longer fits its params.
    pub fn has_layout_type_conflict(&self) -> bool {
        self.base.has_layout_type_conflict(self.combined_layout_type())
    }

    pub fn clear_params(&mut self) {
        self.base.clear_params();
    }

    /// Applies `action`, layout type first, then params.
    pub fn update(&mut self, action: &UpdateAction) {
        action.layout_type().apply_to(&mut self.base.layout_type);
        action.params().apply_to(&mut self.base.params);
    }
}
