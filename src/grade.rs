//! Marks to grade points.
//!
//! | marks >= | points | grade |
//! |----------|--------|-------|
//! | 90       | 10     | O     |
//! | 80       | 9      | A+    |
//! | 70       | 8      | A     |
//! | 60       | 7      | B+    |
//! | 50       | 6      | B     |
//! | 40       | 5      | C     |
//! | 30       | 4      | D     |
//! | 20       | 3      | E     |
//! | 10       | 2      | F     |
//! | 0        | 1      | F     |

use crate::models::Grade;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeRung {
    pub min_marks: u8,
    pub points: u8,
    pub grade: Grade,
}

const fn rung(min_marks: u8, points: u8, grade: Grade) -> GradeRung {
    GradeRung {
        min_marks,
        points,
        grade,
    }
}

/// Sorted by `min_marks`, highest first. The last rung catches everything.
pub const GRADE_LADDER: [GradeRung; 10] = [
    rung(90, 10, Grade::O),
    rung(80, 9, Grade::APlus),
    rung(70, 8, Grade::A),
    rung(60, 7, Grade::BPlus),
    rung(50, 6, Grade::B),
    rung(40, 5, Grade::C),
    rung(30, 4, Grade::D),
    rung(20, 3, Grade::E),
    rung(10, 2, Grade::F),
    rung(0, 1, Grade::F),
];

pub fn map_marks(marks: u8) -> (u8, Grade) {
    let rung = GRADE_LADDER
        .iter()
        .find(|rung| marks >= rung.min_marks)
        .unwrap_or(&GRADE_LADDER[GRADE_LADDER.len() - 1]);
    (rung.points, rung.grade)
}
