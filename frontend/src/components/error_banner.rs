use shared::ApiError;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub error: Option<ApiError>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

/// Inline message for a failed request or a rejected form
#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    let Some(error) = props.error.as_ref() else {
        return html! {};
    };

    html! {
        <div class="form-message error" role="alert">
            <span>{format!("⚠️ {}", error)}</span>
            {if let Some(on_dismiss) = props.on_dismiss.clone() {
                html! {
                    <button type="button" class="btn-dismiss" onclick={move |_| on_dismiss.emit(())}>
                        {"×"}
                    </button>
                }
            } else { html! {} }}
        </div>
    }
}
