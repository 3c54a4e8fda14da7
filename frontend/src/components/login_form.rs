use shared::{ApiError, AuthResponse, LoginRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::error_banner::ErrorBanner;
use crate::page::Page;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub api_client: ApiClient,
    pub on_login: Callback<AuthResponse>,
    pub on_navigate: Callback<Page>,
    /// Shown when the previous session was rejected by the server
    #[prop_or_default]
    pub session_expired: bool,
}

#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let submitting = use_state(|| false);
    let error = use_state(|| Option::<ApiError>::None);

    let on_username_change = {
        let username = username.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let on_login = props.on_login.clone();
        let username = username.clone();
        let password = password.clone();
        let submitting = submitting.clone();
        let error = error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            let request = LoginRequest {
                username: username.trim().to_string(),
                password: (*password).clone(),
            };
            if request.username.is_empty() || request.password.is_empty() {
                error.set(Some(ApiError::invalid("username", "Identifiant et mot de passe requis")));
                return;
            }

            let api_client = api_client.clone();
            let on_login = on_login.clone();
            let submitting = submitting.clone();
            let error = error.clone();

            spawn_local(async move {
                submitting.set(true);
                error.set(None);

                match api_client.login(&request).await {
                    Ok(response) => on_login.emit(response),
                    Err(e) => {
                        Logger::warn_with_component("login", &format!("Login failed: {}", e));
                        error.set(Some(e));
                    }
                }

                submitting.set(false);
            });
        })
    };

    let to_register = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Page::Register))
    };

    html! {
        <div class="form-container">
            <div class="card">
                <h2>{"Connexion"}</h2>
                {if props.session_expired {
                    html! { <div class="form-message info">{"Votre session a expiré, reconnectez-vous."}</div> }
                } else { html! {} }}
                <ErrorBanner error={(*error).clone()} />
                <form class="form-group" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="username" class="form-label">{"Nom d'utilisateur"}</label>
                        <input
                            id="username"
                            type="text"
                            class="input"
                            value={(*username).clone()}
                            onchange={on_username_change}
                            disabled={*submitting}
                            required=true
                        />
                    </div>
                    <div class="form-group">
                        <label for="password" class="form-label">{"Mot de passe"}</label>
                        <input
                            id="password"
                            type="password"
                            class="input"
                            value={(*password).clone()}
                            onchange={on_password_change}
                            disabled={*submitting}
                            required=true
                        />
                    </div>
                    <button type="submit" class="auth-button" disabled={*submitting}>
                        {if *submitting { "Connexion..." } else { "Se connecter" }}
                    </button>
                    <div class="auth-footer">
                        <p>
                            {"Pas encore de compte ? "}
                            <a onclick={to_register}>{"S'inscrire"}</a>
                        </p>
                    </div>
                </form>
            </div>
        </div>
    }
}
