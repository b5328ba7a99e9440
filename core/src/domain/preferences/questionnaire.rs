use serde::Serialize;

/// Which preference list a question's answers land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionCategory {
    HealthConcerns,
    Allergies,
    DietaryPreferences,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireQuestion {
    pub id: &'static str,
    pub category: QuestionCategory,
    pub question: &'static str,
    pub options: &'static [&'static str],
    pub allow_multiple: bool,
}

/// The fixed onboarding questionnaire. Answers are stored verbatim as
/// tags in the matching `UserPreferences` list.
pub const QUESTIONNAIRE_QUESTIONS: &[QuestionnaireQuestion] = &[
    QuestionnaireQuestion {
        id: "health-1",
        category: QuestionCategory::HealthConcerns,
        question: "Do you have any of the following health conditions?",
        options: &[
            "Diabetes",
            "Cardiovascular Disease",
            "Hypertension",
            "High Cholesterol",
            "None of the above",
        ],
        allow_multiple: true,
    },
    QuestionnaireQuestion {
        id: "allergies-1",
        category: QuestionCategory::Allergies,
        question: "Do you have any of these common food allergies?",
        options: &[
            "Milk/Dairy",
            "Eggs",
            "Fish",
            "Shellfish",
            "Tree Nuts",
            "Peanuts",
            "Wheat",
            "Soy",
            "None",
        ],
        allow_multiple: true,
    },
    QuestionnaireQuestion {
        id: "diet-1",
        category: QuestionCategory::DietaryPreferences,
        question: "What are your dietary practices?",
        options: &[
            "Vegetarian",
            "Vegan",
            "Gluten-Free",
            "Kosher",
            "Halal",
            "No specific dietary restrictions",
        ],
        allow_multiple: false,
    },
    QuestionnaireQuestion {
        id: "health-2",
        category: QuestionCategory::HealthConcerns,
        question: "Are you monitoring your intake of any of these nutrients?",
        options: &[
            "Sodium (Salt)",
            "Added Sugars",
            "Saturated Fats",
            "Protein",
            "Fiber",
            "Not monitoring specific nutrients",
        ],
        allow_multiple: true,
    },
    QuestionnaireQuestion {
        id: "health-3",
        category: QuestionCategory::HealthConcerns,
        question: "Do you have any digestive health conditions?",
        options: &[
            "Celiac Disease",
            "Inflammatory Bowel Disease (IBD)",
            "Irritable Bowel Syndrome (IBS)",
            "Acid Reflux (GERD)",
            "Lactose Intolerance",
            "None of the above",
        ],
        allow_multiple: true,
    },
    QuestionnaireQuestion {
        id: "allergies-2",
        category: QuestionCategory::Allergies,
        question: "Do you have any sensitivities to these food additives?",
        options: &[
            "Artificial Sweeteners",
            "MSG (Monosodium Glutamate)",
            "Sulfites",
            "Food Colorings",
            "Preservatives",
            "None",
        ],
        allow_multiple: true,
    },
    QuestionnaireQuestion {
        id: "diet-2",
        category: QuestionCategory::DietaryPreferences,
        question: "What is your primary goal for food choices?",
        options: &[
            "Weight Management",
            "Athletic Performance",
            "Heart Health",
            "Blood Sugar Control",
            "General Wellness",
            "No specific goal",
        ],
        allow_multiple: false,
    },
    QuestionnaireQuestion {
        id: "health-4",
        category: QuestionCategory::HealthConcerns,
        question: "Are you deficient in or supplementing any of these vitamins/minerals?",
        options: &[
            "Vitamin B12",
            "Vitamin D",
            "Iron",
            "Calcium",
            "Omega-3 Fatty Acids",
            "Not aware of any deficiencies",
        ],
        allow_multiple: true,
    },
    QuestionnaireQuestion {
        id: "diet-3",
        category: QuestionCategory::DietaryPreferences,
        question: "Which of these describes your meal pattern preferences?",
        options: &[
            "Regular 3 meals per day",
            "Small frequent meals (5-6 per day)",
            "Intermittent Fasting",
            "Time-Restricted Eating",
            "No specific pattern",
        ],
        allow_multiple: false,
    },
    QuestionnaireQuestion {
        id: "health-5",
        category: QuestionCategory::HealthConcerns,
        question: "Do you need to avoid any of these ingredients for medical reasons?",
        options: &[
            "Caffeine",
            "Alcohol",
            "Tyramine (found in aged foods)",
            "FODMAPs",
            "Histamine",
            "None of the above",
        ],
        allow_multiple: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questionnaire_ids_are_unique() {
        let mut ids: Vec<&str> = QUESTIONNAIRE_QUESTIONS.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), QUESTIONNAIRE_QUESTIONS.len());
    }

    #[test]
    fn every_question_offers_an_opt_out() {
        for question in QUESTIONNAIRE_QUESTIONS {
            assert!(
                question.options.iter().any(|o| o.starts_with("No")
                    || o.starts_with("Not")
                    || o.starts_with("None")),
                "question {} has no opt-out option",
                question.id
            );
        }
    }
}
