use shared::validation::validate_registration;
use shared::{ApiError, AuthResponse, RegisterRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::error_banner::ErrorBanner;
use crate::page::Page;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct RegisterFormProps {
    pub api_client: ApiClient,
    pub on_register: Callback<AuthResponse>,
    pub on_navigate: Callback<Page>,
}

#[derive(Clone, Copy)]
enum Field {
    Username,
    FirstName,
    LastName,
    Email,
    Password,
    Password2,
}

fn set_field(request: &mut RegisterRequest, field: Field, value: String) {
    match field {
        Field::Username => request.username = value,
        Field::FirstName => request.first_name = value,
        Field::LastName => request.last_name = value,
        Field::Email => request.email = value,
        Field::Password => request.password = value,
        Field::Password2 => request.password2 = value,
    }
}

#[function_component(RegisterForm)]
pub fn register_form(props: &RegisterFormProps) -> Html {
    let form = use_state(RegisterRequest::default);
    let submitting = use_state(|| false);
    let error = use_state(|| Option::<ApiError>::None);

    let on_change = |field: Field| {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            set_field(&mut next, field, input.value());
            form.set(next);
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let on_register = props.on_register.clone();
        let form = form.clone();
        let submitting = submitting.clone();
        let error = error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            let request = RegisterRequest {
                username: form.username.trim().to_string(),
                email: form.email.trim().to_string(),
                first_name: form.first_name.trim().to_string(),
                last_name: form.last_name.trim().to_string(),
                ..(*form).clone()
            };
            if let Err(e) = validate_registration(&request) {
                error.set(Some(e));
                return;
            }

            let api_client = api_client.clone();
            let on_register = on_register.clone();
            let submitting = submitting.clone();
            let error = error.clone();

            spawn_local(async move {
                submitting.set(true);
                error.set(None);

                match api_client.register(&request).await {
                    Ok(response) => {
                        Logger::info_with_component("register", &format!("🎉 Account created for {}", response.user.username));
                        on_register.emit(response);
                    }
                    Err(e) => {
                        Logger::warn_with_component("register", &format!("Registration failed: {}", e));
                        error.set(Some(e));
                    }
                }

                submitting.set(false);
            });
        })
    };

    let to_login = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Page::Login))
    };

    let input = |id: &'static str, label: &'static str, kind: &'static str, value: &str, field: Field| {
        html! {
            <div class="form-group">
                <label for={id} class="form-label">{label}</label>
                <input
                    id={id}
                    type={kind}
                    class="input"
                    value={value.to_string()}
                    onchange={on_change(field)}
                    disabled={*submitting}
                    required=true
                />
            </div>
        }
    };

    html! {
        <div class="form-container">
            <div class="card">
                <h2>{"Créer un compte"}</h2>
                <ErrorBanner error={(*error).clone()} />
                <form class="form-group" onsubmit={on_submit}>
                    {input("username", "Nom d'utilisateur", "text", &form.username, Field::Username)}
                    {input("first_name", "Prénom", "text", &form.first_name, Field::FirstName)}
                    {input("last_name", "Nom", "text", &form.last_name, Field::LastName)}
                    {input("email", "Adresse email", "email", &form.email, Field::Email)}
                    {input("password", "Mot de passe", "password", &form.password, Field::Password)}
                    {input("password2", "Confirmer le mot de passe", "password", &form.password2, Field::Password2)}
                    <button type="submit" class="auth-button" disabled={*submitting}>
                        {if *submitting { "Inscription..." } else { "S'inscrire" }}
                    </button>
                    <div class="auth-footer">
                        <p>
                            {"Déjà un compte ? "}
                            <a onclick={to_login}>{"Se connecter"}</a>
                        </p>
                    </div>
                </form>
            </div>
        </div>
    }
}
