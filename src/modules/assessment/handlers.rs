use askama::Template;
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::collections::HashMap;
use time::format_description::well_known::Rfc3339;
use tracing::{error, warn};

use super::questionnaire::{Questionnaire, StepAction, StepOutcome, ANSWER_PREFIX};
use crate::app_state::AppState;
use crate::modules::quiz::service::submit_assessment;
use crate::quiz::{
    render_text_report, report_file_name, CategoryScore, FeedbackTier, QuizAssessment,
};

pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                error!("Failed to render template: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

pub struct CategoryTab {
    pub index: usize,
    pub name: &'static str,
    pub current: bool,
    pub complete: bool,
}

pub struct QuestionView {
    pub field: String,
    pub title: String,
    pub description: String,
    pub yes: bool,
    pub no: bool,
}

pub struct HiddenField {
    pub name: String,
    pub value: &'static str,
}

#[derive(Template)]
#[template(path = "assessment/questionnaire.html")]
pub struct QuestionnaireTemplate {
    pub app_name: String,
    pub step: usize,
    pub step_number: usize,
    pub category_count: usize,
    pub category_name: &'static str,
    pub category_summary: &'static str,
    pub answered: usize,
    pub total: usize,
    pub progress: u32,
    pub tabs: Vec<CategoryTab>,
    pub questions: Vec<QuestionView>,
    pub hidden: Vec<HiddenField>,
    pub category_answered: usize,
    pub category_total: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub can_advance: bool,
    pub message: Option<String>,
}

impl QuestionnaireTemplate {
    fn build(app_name: &str, questionnaire: &Questionnaire<'_>, message: Option<String>) -> Self {
        let category = questionnaire.current_category();

        let tabs = questionnaire
            .categories()
            .iter()
            .enumerate()
            .map(|(index, tab)| CategoryTab {
                index,
                name: tab.name(),
                current: index == questionnaire.current_index(),
                complete: questionnaire.is_category_complete(*tab),
            })
            .collect();

        let questions: Vec<QuestionView> = questionnaire
            .current_items()
            .map(|item| {
                let answer = questionnaire.answer(&item.id);
                QuestionView {
                    field: format!("{}{}", ANSWER_PREFIX, item.id),
                    title: item.title.clone(),
                    description: item.description.clone(),
                    yes: answer == Some(true),
                    no: answer == Some(false),
                }
            })
            .collect();

        let hidden = questionnaire
            .carried_answers()
            .into_iter()
            .map(|(name, value)| HiddenField { name, value })
            .collect();

        let category_total = questions.len();
        let category_answered = questions.iter().filter(|q| q.yes || q.no).count();

        Self {
            app_name: app_name.to_string(),
            step: questionnaire.current_index(),
            step_number: questionnaire.current_index() + 1,
            category_count: questionnaire.categories().len(),
            category_name: category.name(),
            category_summary: category.summary(),
            answered: questionnaire.answered_count(),
            total: questionnaire.total_count(),
            progress: questionnaire.progress_percentage(),
            tabs,
            questions,
            hidden,
            category_answered,
            category_total,
            is_first: questionnaire.is_first(),
            is_last: questionnaire.is_last(),
            can_advance: questionnaire.can_advance(),
            message,
        }
    }
}

#[derive(Template)]
#[template(path = "assessment/results.html")]
pub struct ResultsTemplate {
    pub app_name: String,
    pub assessment_id: String,
    pub completed_at: String,
    pub overall_percentage: u32,
    pub tier_title: &'static str,
    pub overall_feedback: String,
    pub category_scores: Vec<CategoryScore>,
    pub recommendations: Vec<String>,
    pub report: String,
    pub report_file_name: String,
}

impl ResultsTemplate {
    fn build(app_name: &str, assessment: QuizAssessment) -> Self {
        let completed_at = assessment
            .completed_at
            .format(&Rfc3339)
            .unwrap_or_default();
        let report = render_text_report(&assessment.result);
        let result = assessment.result;

        Self {
            app_name: app_name.to_string(),
            assessment_id: assessment.id.to_string(),
            completed_at,
            overall_percentage: result.overall_percentage,
            tier_title: FeedbackTier::for_percentage(result.overall_percentage).title(),
            overall_feedback: result.overall_feedback,
            category_scores: result.category_scores,
            recommendations: result.recommendations,
            report,
            report_file_name: report_file_name(assessment.completed_at.date()),
        }
    }
}

pub async fn root() -> Redirect {
    Redirect::to("/assessment")
}

/// First category of a fresh questionnaire
pub async fn start_assessment(State(state): State<AppState>) -> impl IntoResponse {
    let questionnaire = Questionnaire::new(&state.catalog);
    HtmlTemplate(QuestionnaireTemplate::build(&state.config.app.name, &questionnaire, None))
}

/// Moves between categories and submits once every item is answered
pub async fn step_assessment(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let app_name = state.config.app.name.as_str();

    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            warn!(error = %rejection, "Malformed questionnaire form");
            let questionnaire = Questionnaire::new(&state.catalog);
            let page = QuestionnaireTemplate::build(
                app_name,
                &questionnaire,
                Some("Your answers could not be read. Please start again.".to_string()),
            );
            return (StatusCode::BAD_REQUEST, HtmlTemplate(page)).into_response();
        }
    };

    let mut questionnaire = Questionnaire::from_form(&state.catalog, &fields);

    let action = match fields.get("action").map(|a| a.parse::<StepAction>()) {
        Some(Ok(action)) => action,
        Some(Err(e)) => {
            warn!(error = %e, "Ignoring unknown questionnaire action");
            return HtmlTemplate(QuestionnaireTemplate::build(app_name, &questionnaire, None))
                .into_response();
        }
        None => {
            return HtmlTemplate(QuestionnaireTemplate::build(app_name, &questionnaire, None))
                .into_response();
        }
    };

    match questionnaire.apply(action) {
        StepOutcome::Moved => {
            HtmlTemplate(QuestionnaireTemplate::build(app_name, &questionnaire, None)).into_response()
        }
        StepOutcome::Blocked(message) => HtmlTemplate(QuestionnaireTemplate::build(
            app_name,
            &questionnaire,
            Some(message),
        ))
        .into_response(),
        StepOutcome::ReadyToSubmit => {
            match submit_assessment(&state, questionnaire.responses()).await {
                Ok(assessment) => {
                    HtmlTemplate(ResultsTemplate::build(app_name, assessment)).into_response()
                }
                Err(e) => {
                    error!(error = %e, "Error processing quiz assessment");
                    let page = QuestionnaireTemplate::build(
                        app_name,
                        &questionnaire,
                        Some("We couldn't process your assessment. Please try again.".to_string()),
                    );
                    (e.status(), HtmlTemplate(page)).into_response()
                }
            }
        }
    }
}
