use crate::error::PagesplitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How the content of a scanned sheet is split into logical pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    /// Let the pipeline detect the layout. Compatible with any params.
    Auto,
    SinglePageUncut,
    PagePlusOffcut,
    TwoPages,
}

impl LayoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::Auto => "auto",
            LayoutType::SinglePageUncut => "single-page-uncut",
            LayoutType::PagePlusOffcut => "page-plus-offcut",
            LayoutType::TwoPages => "two-pages",
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutType {
    type Err = PagesplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(LayoutType::Auto),
            "single-page-uncut" | "single" => Ok(LayoutType::SinglePageUncut),
            "page-plus-offcut" | "offcut" => Ok(LayoutType::PagePlusOffcut),
            "two-pages" | "two" => Ok(LayoutType::TwoPages),
            other => Err(PagesplitError::InvalidLayoutType(other.to_string())),
        }
    }
}

/// Identifies one scanned image: a file, and a page inside it for
/// multi-page formats. `page == 0` stands for the whole file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImageId {
    file_path: PathBuf,
    #[serde(default)]
    page: u32,
}

impl ImageId {
    pub fn new(file_path: impl Into<PathBuf>, page: u32) -> Self {
        Self {
            file_path: file_path.into(),
            page,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn set_file_path(&mut self, file_path: impl Into<PathBuf>) {
        self.file_path = file_path.into();
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_multi_page_file(&self) -> bool {
        self.page > 0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.page == 0 {
            write!(f, "{}", self.file_path.display())
        } else {
            write!(f, "{}#{}", self.file_path.display(), self.page)
        }
    }
}

impl FromStr for ImageId {
    type Err = PagesplitError;

    /// Parses `path` or `path#page`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PagesplitError::InvalidPage("empty page reference".to_string()));
        }
        if let Some((path, page)) = s.rsplit_once('#') {
            if let Ok(page) = page.parse::<u32>() {
                if path.is_empty() {
                    return Err(PagesplitError::InvalidPage(s.to_string()));
                }
                return Ok(ImageId::new(path, page));
            }
        }
        Ok(ImageId::new(s, 0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubPage {
    SinglePage,
    LeftPage,
    RightPage,
}

/// A logical page produced by splitting an image.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageId {
    image_id: ImageId,
    sub_page: SubPage,
}

impl PageId {
    pub fn new(image_id: ImageId, sub_page: SubPage) -> Self {
        Self { image_id, sub_page }
    }

    pub fn image_id(&self) -> &ImageId {
        &self.image_id
    }

    pub fn sub_page(&self) -> SubPage {
        self.sub_page
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_page {
            SubPage::SinglePage => write!(f, "{}", self.image_id),
            SubPage::LeftPage => write!(f, "{} (left)", self.image_id),
            SubPage::RightPage => write!(f, "{} (right)", self.image_id),
        }
    }
}

// --- Params ---

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

/// The kind of split a [`PageLayout`] was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageLayoutShape {
    SinglePageUncut,
    /// A single page with an offcut trimmed away on one or both sides.
    SinglePageCut,
    TwoPages,
}

impl PageLayoutShape {
    /// The only non-auto layout type params of this shape can live with.
    pub fn compatible_layout_type(&self) -> LayoutType {
        match self {
            PageLayoutShape::SinglePageUncut => LayoutType::SinglePageUncut,
            PageLayoutShape::SinglePageCut => LayoutType::PagePlusOffcut,
            PageLayoutShape::TwoPages => LayoutType::TwoPages,
        }
    }

    /// Number of cutting lines a layout of this shape carries.
    pub fn cutter_count(&self) -> usize {
        match self {
            PageLayoutShape::SinglePageUncut => 0,
            PageLayoutShape::SinglePageCut => 2,
            PageLayoutShape::TwoPages => 1,
        }
    }
}

/// Split geometry in image coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPageLayout")]
pub struct PageLayout {
    shape: PageLayoutShape,
    outline: Rect,
    cutters: Vec<Segment>,
}

#[derive(Deserialize)]
struct RawPageLayout {
    shape: PageLayoutShape,
    outline: Rect,
    #[serde(default)]
    cutters: Vec<Segment>,
}

impl TryFrom<RawPageLayout> for PageLayout {
    type Error = PagesplitError;

    fn try_from(raw: RawPageLayout) -> Result<Self, Self::Error> {
        let expected = raw.shape.cutter_count();
        if raw.cutters.len() != expected {
            return Err(PagesplitError::InvalidParams(format!(
                "{:?} layout needs {} cutter(s), got {}",
                raw.shape,
                expected,
                raw.cutters.len()
            )));
        }
        Ok(Self {
            shape: raw.shape,
            outline: raw.outline,
            cutters: raw.cutters,
        })
    }
}

impl PageLayout {
    pub fn single_page_uncut(outline: Rect) -> Self {
        Self {
            shape: PageLayoutShape::SinglePageUncut,
            outline,
            cutters: Vec::new(),
        }
    }

    pub fn single_page_cut(outline: Rect, cutter1: Segment, cutter2: Segment) -> Self {
        Self {
            shape: PageLayoutShape::SinglePageCut,
            outline,
            cutters: vec![cutter1, cutter2],
        }
    }

    pub fn two_pages(outline: Rect, split_line: Segment) -> Self {
        Self {
            shape: PageLayoutShape::TwoPages,
            outline,
            cutters: vec![split_line],
        }
    }

    pub fn shape(&self) -> PageLayoutShape {
        self.shape
    }

    pub fn outline(&self) -> Rect {
        self.outline
    }

    pub fn cutters(&self) -> &[Segment] {
        &self.cutters
    }
}

/// The input a [`PageLayout`] was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    pub image_size: Size,
    #[serde(default)]
    pub rotation: Rotation,
    pub layout_type: LayoutType,
}

impl Dependencies {
    pub fn new(image_size: Size, rotation: Rotation, layout_type: LayoutType) -> Self {
        Self {
            image_size,
            rotation,
            layout_type,
        }
    }

    /// Whether params computed against `self` are still valid for `other`.
    pub fn compatible_with(&self, other: &Dependencies) -> bool {
        if self.image_size != other.image_size || self.rotation != other.rotation {
            return false;
        }
        self.layout_type == LayoutType::Auto || self.layout_type == other.layout_type
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoManualMode {
    #[default]
    Auto,
    Manual,
}

/// Computed split parameters for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    page_layout: PageLayout,
    dependencies: Dependencies,
    #[serde(default)]
    mode: AutoManualMode,
}

impl Params {
    pub fn new(page_layout: PageLayout, dependencies: Dependencies, mode: AutoManualMode) -> Self {
        Self {
            page_layout,
            dependencies,
            mode,
        }
    }

    pub fn page_layout(&self) -> &PageLayout {
        &self.page_layout
    }

    pub fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    pub fn mode(&self) -> AutoManualMode {
        self.mode
    }

    pub fn shape(&self) -> PageLayoutShape {
        self.page_layout.shape()
    }
}
