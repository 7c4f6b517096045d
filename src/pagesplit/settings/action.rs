use crate::model::{LayoutType, Params};

/// What to do with one field of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldAction<T> {
    Set(T),
    Clear,
    DontTouch,
}

// Not derived: the derive would demand `T: Default`.
impl<T> Default for FieldAction<T> {
    fn default() -> Self {
        FieldAction::DontTouch
    }
}

impl<T> FieldAction<T> {
    /// Applies the action to `slot`.
    pub fn apply_to(&self, slot: &mut Option<T>)
    where
        T: Clone,
    {
        match self {
            FieldAction::Set(value) => *slot = Some(value.clone()),
            FieldAction::Clear => *slot = None,
            FieldAction::DontTouch => {}
        }
    }

    pub fn is_dont_touch(&self) -> bool {
        matches!(self, FieldAction::DontTouch)
    }
}

/// A request to change a page's record.
///
/// Both fields start out as [`FieldAction::DontTouch`], so an action only
/// changes what it was explicitly told to. The same action may be applied
/// to any number of pages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateAction {
    params: FieldAction<Params>,
    layout_type: FieldAction<LayoutType>,
}

impl UpdateAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_params(mut self, params: Params) -> Self {
        self.params = FieldAction::Set(params);
        self
    }

    pub fn clear_params(mut self) -> Self {
        self.params = FieldAction::Clear;
        self
    }

    pub fn set_layout_type(mut self, layout_type: LayoutType) -> Self {
        self.layout_type = FieldAction::Set(layout_type);
        self
    }

    pub fn clear_layout_type(mut self) -> Self {
        self.layout_type = FieldAction::Clear;
        self
    }

    pub fn params(&self) -> &FieldAction<Params> {
        &self.params
    }

    pub fn layout_type(&self) -> &FieldAction<LayoutType> {
        &self.layout_type
    }

    pub fn is_noop(&self) -> bool {
        self.params.is_dont_touch() && self.layout_type.is_dont_touch()
    }
}
