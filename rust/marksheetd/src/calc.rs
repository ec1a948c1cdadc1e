use serde::{Serialize, Serializer};

pub const PASSING_MARKS: u32 = 33;
pub const MAX_MARKS_PER_SUBJECT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeBand {
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
    pub points: u32,
}

impl GradeBand {
    const fn new(label: &'static str, min: u32, max: u32, points: u32) -> Self {
        Self {
            label,
            min,
            max,
            points,
        }
    }

    pub fn contains(&self, marks: u32) -> bool {
        marks >= self.min && marks <= self.max
    }

    /// Style hook used by the preview: `A+` -> `grade-a-plus`.
    pub fn css_class(&self) -> String {
        format!(
            "grade-{}",
            self.label.to_ascii_lowercase().replace('+', "-plus")
        )
    }
}

/// Grading scale, highest band first. Ranges are disjoint and cover 0..=100;
/// lookups scan in this order and the first containing band wins.
pub const GRADE_BANDS: [GradeBand; 8] = [
    GradeBand::new("A+", 90, 100, 10),
    GradeBand::new("A", 80, 89, 9),
    GradeBand::new("B+", 70, 79, 8),
    GradeBand::new("B", 60, 69, 7),
    GradeBand::new("C+", 50, 59, 6),
    GradeBand::new("C", 40, 49, 5),
    GradeBand::new("D", 33, 39, 4),
    GradeBand::new("F", 0, 32, 0),
];

const FAIL_BAND: GradeBand = GRADE_BANDS[GRADE_BANDS.len() - 1];

/// First band containing `marks`, or `None` outside 0..=100.
pub fn band_for(marks: u32) -> Option<&'static GradeBand> {
    GRADE_BANDS.iter().find(|b| b.contains(marks))
}

/// Band for `marks`, falling back to `F` when no band contains it (a subject
/// total above 100).
pub fn grade_band(marks: u32) -> &'static GradeBand {
    band_for(marks).unwrap_or(&FAIL_BAND)
}

pub fn grade_for(marks: u32) -> &'static str {
    grade_band(marks).label
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectScore {
    pub name: String,
    pub theory_marks: u32,
    pub practical_marks: u32,
}

impl SubjectScore {
    pub fn new(name: impl Into<String>, theory_marks: u32, practical_marks: u32) -> Self {
        Self {
            name: name.into(),
            theory_marks,
            practical_marks,
        }
    }

    pub fn total(&self) -> u32 {
        self.theory_marks.saturating_add(self.practical_marks)
    }

    pub fn band(&self) -> &'static GradeBand {
        grade_band(self.total())
    }

    pub fn grade(&self) -> &'static str {
        self.band().label
    }

    pub fn passed(&self) -> bool {
        self.total() >= PASSING_MARKS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Pass => "PASS",
            Outcome::Fail => "FAIL",
        }
    }
}

/// Share of the maximum obtained, held as whole hundredths of a percent.
///
/// Both the displayed text and the integer used for grading are rounded
/// half up from the exact ratio, so the two always agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Percentage {
    hundredths: u64,
    whole: u32,
}

impl Percentage {
    pub fn of(obtained: u32, max: u32) -> Self {
        if max == 0 {
            return Self::default();
        }
        let (o, m) = (obtained as u64, max as u64);
        Self {
            hundredths: (o * 10_000 * 2 + m) / (2 * m),
            whole: ((o * 100 * 2 + m) / (2 * m)) as u32,
        }
    }

    /// Rounded to the nearest whole percent, halves up.
    pub fn whole(&self) -> u32 {
        self.whole
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallResult {
    pub total_obtained: u32,
    pub total_max: u32,
    pub percentage: Percentage,
    pub overall_grade: &'static str,
    pub result: Outcome,
}

impl OverallResult {
    pub fn percentage_text(&self) -> String {
        self.percentage.to_string()
    }
}

/// Overall totals, percentage, grade and result for an ordered list of
/// subjects. Marks are taken as given; normalization happens upstream.
pub fn compute_overall(subjects: &[SubjectScore]) -> OverallResult {
    let mut total_obtained: u32 = 0;
    let mut total_max: u32 = 0;
    let mut all_passed = true;

    for s in subjects {
        total_obtained = total_obtained.saturating_add(s.total());
        total_max = total_max.saturating_add(MAX_MARKS_PER_SUBJECT);
        if !s.passed() {
            all_passed = false;
        }
    }

    let percentage = Percentage::of(total_obtained, total_max);
    let overall_grade = grade_for(percentage.whole());
    // obtained / max >= 33%, compared exactly.
    let meets_threshold =
        (total_obtained as u64) * 100 >= (PASSING_MARKS as u64) * (total_max as u64);
    let result = if !subjects.is_empty() && all_passed && meets_threshold {
        Outcome::Pass
    } else {
        Outcome::Fail
    };

    OverallResult {
        total_obtained,
        total_max,
        percentage,
        overall_grade,
        result,
    }
}
