//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::engine::{format_complex, Exercise, FieldKind, Verdict};
use crate::lesson::Section;
use crate::plane::PlaneView;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewSession,
    GetExercise {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    NewExercise {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    SubmitAnswers {
        #[serde(rename = "sessionId")]
        session_id: String,
        #[serde(default)]
        answers: AnswerSheet,
        #[serde(default, rename = "showSteps")]
        show_steps: bool,
    },
    GetRecap {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    NewRecap {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    SubmitRecap {
        #[serde(rename = "sessionId")]
        session_id: String,
        #[serde(default)]
        answers: Vec<RecapAnswer>,
    },
    Plane(PlaneIn),
    Lesson,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Session {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Exercise {
        exercise: ExerciseOut,
    },
    AnswerResult(GradeOut),
    Recap {
        items: Vec<RecapItemOut>,
    },
    RecapResult {
        rows: Vec<RecapRowOut>,
    },
    Plane(PlaneView),
    Lesson {
        title: &'static str,
        sections: Vec<Section>,
    },
    Error {
        message: String,
    },
}

/// Operands of an exercise as shown to the learner.
#[derive(Debug, Serialize)]
pub struct ExerciseOut {
    pub z1: String,
    pub z2: String,
}

pub fn to_out(ex: &Exercise) -> ExerciseOut {
    ExerciseOut {
        z1: format_complex(ex.z1),
        z2: format_complex(ex.z2),
    }
}

/// Free-text answers for one exercise. Missing or blank fields are not graded.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnswerSheet {
    pub sum: String,
    pub product: String,
    pub modulus: String,
    pub conjugate: String,
    pub linear_combination: String,
}

impl AnswerSheet {
    pub fn get(&self, field: FieldKind) -> &str {
        match field {
            FieldKind::Sum => &self.sum,
            FieldKind::Product => &self.product,
            FieldKind::Modulus => &self.modulus,
            FieldKind::Conjugate => &self.conjugate,
            FieldKind::LinearCombination => &self.linear_combination,
        }
    }
}

/// One verdict line, e.g. `z1+z2: Corect, corect = 3-1i`.
#[derive(Debug, Serialize)]
pub struct AnswerRowOut {
    pub field: FieldKind,
    pub title: String,
    pub verdict: Verdict,
    /// Localized verdict text (or the real-number guidance for the modulus).
    pub label: String,
    pub expected: String,
}

/// Every derived value of the exercise, formatted.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepsOut {
    pub z1: String,
    pub z2: String,
    pub sum: String,
    pub product: String,
    pub modulus: String,
    pub conjugate: String,
    pub linear_combination: String,
}

#[derive(Debug, Serialize)]
pub struct GradeOut {
    pub rows: Vec<AnswerRowOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<StepsOut>,
}

#[derive(Debug, Serialize)]
pub struct RecapItemOut {
    /// 1-based position in the recap set.
    pub index: usize,
    pub z1: String,
    pub z2: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecapAnswer {
    pub sum: String,
    pub product: String,
}

/// Verdict line of the recap, e.g. `Sumă corect? Da, răspuns corect: 3-1i`.
#[derive(Debug, Serialize)]
pub struct RecapVerdictOut {
    pub verdict: Verdict,
    pub label: String,
    pub expected: String,
}

#[derive(Debug, Serialize)]
pub struct RecapRowOut {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<RecapVerdictOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<RecapVerdictOut>,
}

/// Operands and toggles of the plane view. Components default like the
/// lesson page: z1 = 1+1i, z2 = 0, every toggle on.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaneIn {
    pub re1: f64,
    pub im1: f64,
    pub re2: f64,
    pub im2: f64,
    pub show_sum: bool,
    pub show_product: bool,
    pub show_vectors: bool,
}

impl Default for PlaneIn {
    fn default() -> Self {
        Self {
            re1: 1.0,
            im1: 1.0,
            re2: 0.0,
            im2: 0.0,
            show_sum: true,
            show_product: true,
            show_vectors: true,
        }
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct SessionOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswersIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(default)]
    pub answers: AnswerSheet,
    #[serde(default, rename = "showSteps")]
    pub show_steps: bool,
}

#[derive(Debug, Deserialize)]
pub struct RecapAnswersIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(default)]
    pub answers: Vec<RecapAnswer>,
}

#[derive(Debug, Serialize)]
pub struct RecapOut {
    pub items: Vec<RecapItemOut>,
}

#[derive(Debug, Serialize)]
pub struct RecapResultOut {
    pub rows: Vec<RecapRowOut>,
}

#[derive(Debug, Serialize)]
pub struct LessonOut {
    pub title: &'static str,
    pub sections: Vec<Section>,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
