use shared::media::{resolve_media_url, MediaKind};
use shared::MediaItem;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MediaGalleryProps {
    pub medias: Vec<MediaItem>,
    pub media_root: String,
}

/// Thumbnails with a click-to-enlarge overlay
#[function_component(MediaGallery)]
pub fn media_gallery(props: &MediaGalleryProps) -> Html {
    let enlarged = use_state(|| Option::<MediaItem>::None);

    if props.medias.is_empty() {
        return html! {};
    }

    let render = |media: &MediaItem, class: &'static str| {
        let url = resolve_media_url(&props.media_root, media.fichier_url.as_deref());
        match media.type_media {
            MediaKind::Image => html! { <img {class} src={url} alt={media.titre.clone()} /> },
            MediaKind::Video => html! { <video {class} src={url} controls=true /> },
        }
    };

    let on_close = {
        let enlarged = enlarged.clone();
        Callback::from(move |_: MouseEvent| enlarged.set(None))
    };

    html! {
        <div class="media-gallery">
            {for props.medias.iter().map(|media| {
                let enlarged = enlarged.clone();
                let picked = media.clone();
                html! {
                    <div class="media-thumb" key={media.id.to_string()} onclick={move |_| enlarged.set(Some(picked.clone()))}>
                        {render(media, "thumb")}
                    </div>
                }
            })}
            {if let Some(media) = &*enlarged {
                html! {
                    <div class="media-overlay" onclick={on_close}>
                        {render(media, "enlarged")}
                        {if !media.description.is_empty() {
                            html! { <p>{&media.description}</p> }
                        } else { html! {} }}
                    </div>
                }
            } else { html! {} }}
        </div>
    }
}
