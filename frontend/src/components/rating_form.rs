use shared::validation::validate_rating_form;
use shared::{ActivityRating, ApiError};
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::error_banner::ErrorBanner;

#[derive(Properties, PartialEq)]
pub struct RatingFormProps {
    /// The rating being edited, if any
    #[prop_or_default]
    pub existing: Option<ActivityRating>,
    pub submitting: bool,
    pub on_submit: Callback<(u8, String)>,
    pub on_cancel: Callback<()>,
}

#[function_component(RatingForm)]
pub fn rating_form(props: &RatingFormProps) -> Html {
    let note = use_state(|| props.existing.as_ref().map(|r| r.note).unwrap_or(5));
    let commentaire = use_state(|| {
        props
            .existing
            .as_ref()
            .map(|r| r.commentaire.clone())
            .unwrap_or_default()
    });
    let error = use_state(|| Option::<ApiError>::None);

    let on_note_change = {
        let note = note.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            note.set(select.value().parse().unwrap_or(5));
        })
    };

    let on_comment_change = {
        let commentaire = commentaire.clone();
        Callback::from(move |e: Event| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            commentaire.set(area.value());
        })
    };

    let on_submit = {
        let note = note.clone();
        let commentaire = commentaire.clone();
        let error = error.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_rating_form(*note, &commentaire) {
                Ok(()) => {
                    error.set(None);
                    on_submit.emit((*note, commentaire.trim().to_string()));
                }
                Err(e) => error.set(Some(e)),
            }
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <form class="rating-form" onsubmit={on_submit}>
            <h3>{if props.existing.is_some() { "✏️ Modifier mon avis" } else { "⭐ Noter cette activité" }}</h3>
            <ErrorBanner error={(*error).clone()} />
            <div class="form-group">
                <label for="rating-note" class="form-label">{"Note"}</label>
                <select id="rating-note" class="input" onchange={on_note_change} disabled={props.submitting}>
                    {for (1..=5u8).rev().map(|n| html! {
                        <option value={n.to_string()} selected={*note == n}>{format!("{} ★", n)}</option>
                    })}
                </select>
            </div>
            <div class="form-group">
                <label for="rating-comment" class="form-label">{"Commentaire"}</label>
                <textarea
                    id="rating-comment"
                    class="input"
                    rows="3"
                    value={(*commentaire).clone()}
                    onchange={on_comment_change}
                    disabled={props.submitting}
                />
            </div>
            <div class="form-buttons">
                <button type="submit" class="btn btn-primary" disabled={props.submitting}>
                    {if props.submitting { "Envoi..." } else { "Publier" }}
                </button>
                <button type="button" class="btn btn-secondary" onclick={on_cancel}>{"Annuler"}</button>
            </div>
        </form>
    }
}
