//! Files shipped inside the binary and copied into the data directory on first use.

pub const COURSE_LIST: &str = "CourseList";

const BUNDLED: &[(&str, &str)] = &[
    (COURSE_LIST, include_str!("../../resources/CourseList.csv")),
    ("CEG", include_str!("../../resources/CEG.csv")),
    ("CS", include_str!("../../resources/CS.csv")),
];

/// Bundled contents for `name`, matched case-insensitively.
pub fn bundled(name: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|(bundled_name, _)| bundled_name.eq_ignore_ascii_case(name))
        .map(|(_, contents)| *contents)
}

/// Recommended plans available without a file in the data directory.
pub fn recommended_plans() -> impl Iterator<Item = &'static str> {
    BUNDLED
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| *name != COURSE_LIST)
}
