use yew::prelude::*;

use crate::page::Page;

pub fn default_title(code: u16) -> &'static str {
    match code {
        400 => "Requête invalide",
        401 => "Authentification requise",
        403 => "Accès refusé",
        404 => "Page introuvable",
        500 => "Erreur interne",
        503 => "Service indisponible",
        _ => "Problème inattendu",
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorPageProps {
    #[prop_or(404)]
    pub code: u16,
    #[prop_or_default]
    pub title: Option<String>,
    #[prop_or_default]
    pub hint: Option<String>,
    pub on_navigate: Callback<Page>,
}

#[function_component(ErrorPage)]
pub fn error_page(props: &ErrorPageProps) -> Html {
    let title = props
        .title
        .clone()
        .unwrap_or_else(|| default_title(props.code).to_string());

    let on_home = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Page::Home))
    };

    html! {
        <main class="error-page" role="main">
            <div class="error-icon">{"🗺️"}</div>
            <h1>{format!("{} : {}", props.code, title)}</h1>
            <p>{"Oups… On a perdu la route. Essayons un autre chemin."}</p>
            {if let Some(hint) = &props.hint {
                html! { <p>{hint}</p> }
            } else { html! {} }}
            <button type="button" class="btn btn-primary" onclick={on_home}>
                {"Retour à l'accueil"}
            </button>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_default_titles() {
        assert_eq!(default_title(404), "Page introuvable");
        assert_eq!(default_title(503), "Service indisponible");
        assert_eq!(default_title(418), "Problème inattendu");
    }
}
