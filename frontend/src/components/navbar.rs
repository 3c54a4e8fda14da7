use shared::media::resolve_media_url;
use shared::session::Theme;
use shared::User;
use yew::prelude::*;

use crate::page::Page;

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub user: Option<User>,
    pub theme: Theme,
    pub current: Page,
    pub media_root: String,
    pub on_navigate: Callback<Page>,
    pub on_logout: Callback<()>,
    pub on_toggle_theme: Callback<()>,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let section = props.current.nav_section();

    let nav_button = |label: &'static str, target: Page| {
        let on_navigate = props.on_navigate.clone();
        let class = if section == target { "nav-button active" } else { "nav-button" };
        html! {
            <button type="button" {class} onclick={move |_| on_navigate.emit(target.clone())}>
                {label}
            </button>
        }
    };

    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    let on_toggle_theme = {
        let on_toggle_theme = props.on_toggle_theme.clone();
        Callback::from(move |_: MouseEvent| on_toggle_theme.emit(()))
    };

    html! {
        <nav class="navbar-container">
            <div class="navbar-content">
                <div class="nav-group">
                    {nav_button("Accueil", Page::Home)}
                    {if props.user.is_some() {
                        html! {
                            <>
                                {nav_button("Voyages", Page::Dashboard)}
                                {nav_button("Activités", Page::Activities)}
                                {nav_button("Favoris", Page::Favorites)}
                            </>
                        }
                    } else { html! {} }}
                </div>

                <div class="nav-group">
                    {if let Some(user) = &props.user {
                        let avatar = resolve_media_url(&props.media_root, user.profile_image.as_deref());
                        html! {
                            <>
                                <img class="nav-avatar" src={avatar} alt={user.username.clone()} />
                                {nav_button("Profil", Page::Profile)}
                                <button type="button" class="nav-button" onclick={on_logout}>{"Déconnexion"}</button>
                            </>
                        }
                    } else {
                        html! {
                            <>
                                {nav_button("Connexion", Page::Login)}
                                {nav_button("Inscription", Page::Register)}
                            </>
                        }
                    }}
                    <button type="button" class="theme-toggle" onclick={on_toggle_theme}>
                        {if props.theme == Theme::Dark { "☀️" } else { "🌙" }}
                    </button>
                </div>
            </div>
        </nav>
    }
}
