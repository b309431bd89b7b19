use {
    itertools::Itertools,
    std::{borrow::Cow, fmt},
    tap::{Pipe, Tap},
};

/// Key of the synthetic leaf holding a sequence's element count.
pub const LENGTH_KEY: &str = "length";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment<'a> {
    Idx(usize),
    Field(Cow<'a, str>),
}

impl Segment<'_> {
    /// Renders the segment as a child selector (`.field` or `[idx]`).
    fn write_selector(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Idx(idx) => write!(f, "[{idx}]"),
            Segment::Field(field) => write!(f, ".{field}"),
        }
    }
}

impl<'a> From<&'a str> for Segment<'a> {
    fn from(field: &'a str) -> Self {
        field.pipe(Cow::Borrowed).pipe(Segment::Field)
    }
}

impl From<usize> for Segment<'_> {
    fn from(idx: usize) -> Self {
        Segment::Idx(idx)
    }
}

/// Location of a value inside the input, rooted at a top level key.
///
/// Renders as `root.field[0].other`: the first field is written bare, every
/// following field gets a `.` and every index is wrapped in brackets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldPath<'a>(Vec<Segment<'a>>);

impl<'a> FieldPath<'a> {
    pub fn root(key: impl Into<Cow<'a, str>>) -> Self {
        FieldPath(vec![Segment::Field(key.into())])
    }

    pub fn join(&self, segment: impl Into<Segment<'a>>) -> Self {
        self.clone().tap_mut(|p| p.0.push(segment.into()))
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.0
    }

}

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .enumerate()
            .try_for_each(|(position, segment)| match (position, segment) {
                (0, Segment::Field(field)) => f.write_str(field),
                (_, segment) => segment.write_selector(f),
            })
    }
}

impl<'a> FromIterator<Segment<'a>> for FieldPath<'a> {
    fn from_iter<T: IntoIterator<Item = Segment<'a>>>(iter: T) -> Self {
        iter.into_iter().collect_vec().pipe(FieldPath)
    }
}
