use crate::data_store::StoreError;
use crate::web::ui::error::AppError;
use crate::web::ui::flash::{FlashMessage, FlashesInterface};
use actix_web::web::{Html, Redirect};
use actix_web::{Either, HttpRequest};
use askama::Template;

/// Number of venues and artists shown in the "recently listed" sections of the home page
pub const NUM_RECENT_ENTITIES: i64 = 10;

/// Outcome of processing a submitted create or edit form
///
/// Created from the result of the data store operation via `.into()`. Data store errors, which
/// can be fixed by the user by changing the form data, are represented as individual variants,
/// such that the form can be shown again with a helpful flash message. All other errors are
/// wrapped in the `UnexpectedError` variant and produce an error page.
pub enum FormSubmitResult<T> {
    Success(T),
    ValidationError,
    ConflictEntityExists,
    InvalidData(String),
    TransactionConflict,
    UnexpectedError(AppError),
}

impl<T> From<Result<T, StoreError>> for FormSubmitResult<T> {
    fn from(value: Result<T, StoreError>) -> Self {
        match value {
            Ok(v) => FormSubmitResult::Success(v),
            Err(StoreError::ConflictEntityExists) => FormSubmitResult::ConflictEntityExists,
            Err(StoreError::InvalidInputData(e)) => FormSubmitResult::InvalidData(e),
            Err(StoreError::TransactionConflict) => FormSubmitResult::TransactionConflict,
            Err(e) => FormSubmitResult::UnexpectedError(e.into()),
        }
    }
}

/// Create the HTTP response for a submitted create or edit form.
///
/// On success, a success flash message is added and the client is redirected (303 See Other) to
/// the URL returned by `success_redirect_url`, which gets the data store operation's return value
/// (e.g. the id of the new entity). Otherwise, an error flash message is added and the form is
/// rendered again from the given `form_template`, including the user's input and the validation
/// errors.
///
/// `entity_description` is used at the beginning of the flash messages, e.g. "Venue The Musical
/// Hop".
pub fn create_edit_form_response<T>(
    result: FormSubmitResult<T>,
    form_template: &impl Template,
    entity_description: &str,
    success_message_verb: &str,
    success_redirect_url: impl FnOnce(T) -> Result<url::Url, AppError>,
    req: &HttpRequest,
) -> Result<Either<Redirect, Html>, AppError> {
    let error_message = match result {
        FormSubmitResult::Success(value) => {
            req.add_flash_message(FlashMessage::success(format!(
                "{} was successfully {}!",
                entity_description, success_message_verb
            )));
            return Ok(Either::Left(
                Redirect::to(success_redirect_url(value)?.to_string()).see_other(),
            ));
        }
        FormSubmitResult::ValidationError => {
            "The submitted data is invalid. Please check the marked fields.".to_owned()
        }
        FormSubmitResult::ConflictEntityExists => format!(
            "An error occurred. {} could not be saved, because it exists already.",
            entity_description
        ),
        FormSubmitResult::InvalidData(e) => format!(
            "An error occurred. {} could not be saved: {}",
            entity_description, e
        ),
        FormSubmitResult::TransactionConflict => format!(
            "An error occurred. {} could not be saved due to a concurrent database access. Please retry.",
            entity_description
        ),
        FormSubmitResult::UnexpectedError(e) => {
            return Err(e);
        }
    };
    req.add_flash_message(FlashMessage::error(error_message));
    Ok(Either::Right(Html::new(form_template.render()?)))
}
