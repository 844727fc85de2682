use crate::models::Lesson;

/// Lessons at these positions are open without enrollment.
pub const FREE_PREVIEW_COUNT: usize = 2;

const SECTION_TITLES: [&str; 3] = ["Getting Started", "Core Concepts", "Advanced Topics"];

pub fn is_previewable(index: usize, lesson: &Lesson, enrolled: bool) -> bool {
    enrolled || index < FREE_PREVIEW_COUNT || lesson.preview_enabled
}

/// Indexes of lessons the viewer can open.
pub fn accessible_indexes(lessons: &[Lesson], enrolled: bool) -> Vec<usize> {
    lessons
        .iter()
        .enumerate()
        .filter(|(i, lesson)| is_previewable(*i, lesson, enrolled))
        .map(|(i, _)| i)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentSection<'a> {
    pub title: &'static str,
    /// Index of the first lesson of this section within the full list.
    pub offset: usize,
    pub lessons: &'a [Lesson],
}

/// Splits lessons into three consecutive sections of `ceil(n / 3)` each.
/// Trailing sections may be short or empty.
pub fn sections(lessons: &[Lesson]) -> Vec<ContentSection<'_>> {
    let chunk = lessons.len().div_ceil(SECTION_TITLES.len());
    SECTION_TITLES
        .iter()
        .enumerate()
        .map(|(i, &title)| {
            let start = (i * chunk).min(lessons.len());
            let end = if i + 1 == SECTION_TITLES.len() {
                lessons.len()
            } else {
                ((i + 1) * chunk).min(lessons.len())
            };
            ContentSection {
                title,
                offset: start,
                lessons: &lessons[start..end],
            }
        })
        .collect()
}

/// Share of completed lessons as a rounded percentage.
pub fn progress_percent(lessons: &[Lesson]) -> u8 {
    if lessons.is_empty() {
        return 0;
    }
    let done = lessons.iter().filter(|l| l.completed).count();
    let pct = (done * 100 + lessons.len() / 2) / lessons.len();
    u8::try_from(pct).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn lessons(n: usize) -> Vec<Lesson> {
        (0..n)
            .map(|i| Lesson {
                id: format!("l{}", i),
                title: format!("Lesson {}", i + 1),
                order: i32::try_from(i + 1).unwrap_or(i32::MAX),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn first_two_are_free_before_enrollment() {
        assert_eq!(accessible_indexes(&lessons(5), false), vec![0, 1]);
    }

    #[test]
    fn flagged_lessons_are_free_before_enrollment() {
        let mut items = lessons(5);
        items[3].preview_enabled = true;
        assert_eq!(accessible_indexes(&items, false), vec![0, 1, 3]);
    }

    #[test]
    fn enrollment_unlocks_everything() {
        assert_eq!(accessible_indexes(&lessons(5), true), vec![0, 1, 2, 3, 4]);
    }

    #[rstest]
    #[case(0, [0, 0, 0])]
    #[case(1, [1, 0, 0])]
    #[case(4, [2, 2, 0])]
    #[case(6, [2, 2, 2])]
    #[case(7, [3, 3, 1])]
    fn sections_use_ceiling_chunks(#[case] n: usize, #[case] sizes: [usize; 3]) {
        let items = lessons(n);
        let got: Vec<usize> = sections(&items).iter().map(|s| s.lessons.len()).collect();
        assert_eq!(got, sizes.to_vec());
    }

    #[test]
    fn progress_rounds_to_nearest() {
        let mut items = lessons(3);
        assert_eq!(progress_percent(&items), 0);
        items[0].completed = true;
        assert_eq!(progress_percent(&items), 33);
        items[1].completed = true;
        assert_eq!(progress_percent(&items), 67);
        assert_eq!(progress_percent(&[]), 0);
    }
}
