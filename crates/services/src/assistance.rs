//! Canned study-assistance content for the side panel.
//!
//! Unlike question generation and grading, assistance is served from fixed
//! Hebrew templates; no gateway is involved.

use serde::{Deserialize, Serialize};

/// Category of an assistance card, mirrored by the panel's styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistanceKind {
    Explanation,
    Guide,
    Hint,
    Solution,
    Resources,
}

/// One assistance card: a titled block of guidance text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assistance {
    pub kind: AssistanceKind,
    pub title: String,
    pub content: String,
}

/// Serves the fixed assistance cards for the current question.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssistanceService;

impl AssistanceService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// How to read and break down the question.
    #[must_use]
    pub fn question_explanation(&self) -> Assistance {
        Assistance {
            kind: AssistanceKind::Explanation,
            title: "הסבר השאלה".to_string(),
            content: "בשאלה זו אנחנו נדרשים להבין:\n\
                1. מה בדיוק נדרש למצוא\n\
                2. אילו נתונים יש לנו\n\
                3. איך להשתמש בנתונים כדי להגיע לפתרון\n\n\
                הדגשים חשובים:\n\
                - שים לב לכל המספרים והנתונים שמופיעים בשאלה\n\
                - קרא את השאלה שוב וודא שהבנת את כל המונחים\n\
                - חשוב על הקשר בין הנתונים השונים"
                .to_string(),
        }
    }

    /// A recommended approach, without giving the solution away.
    #[must_use]
    pub fn solution_guide(&self) -> Assistance {
        Assistance {
            kind: AssistanceKind::Guide,
            title: "הדרכה לפתרון".to_string(),
            content: "דרך מומלצת לגשת לפתרון:\n\
                1. ארגן את הנתונים בצורה ברורה\n\
                2. חשוב על הנוסחאות הרלוונטיות לנושא\n\
                3. תכנן את שלבי הפתרון\n\
                4. בדוק את ההיגיון של התוצאה\n\n\
                טיפ: נסה לצייר את המצב המתואר בשאלה אם אפשר"
                .to_string(),
        }
    }

    /// A nudge toward the relevant relation between the givens.
    #[must_use]
    pub fn hint(&self) -> Assistance {
        Assistance {
            kind: AssistanceKind::Hint,
            title: "רמז".to_string(),
            content: "רמז שיכול לעזור:\n\
                חשוב על הקשר בין הנתונים שקיבלת.\n\
                האם יש נוסחה מוכרת שמקשרת ביניהם?\n\
                נסה להיזכר בשאלות דומות שפתרת בעבר."
                .to_string(),
        }
    }

    /// The full solving procedure, step by step.
    #[must_use]
    pub fn full_solution(&self) -> Assistance {
        Assistance {
            kind: AssistanceKind::Solution,
            title: "פתרון מלא".to_string(),
            content: "הפתרון המלא מורכב מהשלבים הבאים:\n\n\
                1. ניתוח הנתונים:\n\
                   - רשום את כל הנתונים\n\
                   - הבן מה נדרש למצוא\n\n\
                2. דרך הפתרון:\n\
                   - השתמש בנוסחאות המתאימות\n\
                   - פתור שלב אחר שלב\n\n\
                3. בדיקת הפתרון:\n\
                   - וודא שהתוצאה הגיונית\n\
                   - בדוק את היחידות\n\n\
                התשובה הסופית נמצאת בפתרון המלא של השאלה."
                .to_string(),
        }
    }

    /// Study-material pointers for the given topic.
    #[must_use]
    pub fn resources(&self, topic: &str) -> Assistance {
        Assistance {
            kind: AssistanceKind::Resources,
            title: "חומר עזר".to_string(),
            content: format!(
                "הנה חומר עזר שיכול לעזור לך בנושא הזה:\n\n\
                📚 סיכומים ומסמכים:\n\
                • סיכום מקיף בנושא {topic}\n\
                • דפי נוסחאות רלוונטיים\n\
                • מאגר תרגילים פתורים\n\n\
                🎥 סרטוני הסבר מומלצים:\n\
                • סרטון הסבר על הנושא\n\
                • פתרון תרגילים דומים\n\
                • טיפים וטריקים לפתרון\n\n\
                🔗 קישורים שימושיים:\n\
                • מאמר מעמיק בנושא\n\
                • תרגול אינטראקטיבי\n\
                • כלים מקוונים שיכולים לעזור"
            ),
        }
    }
}
