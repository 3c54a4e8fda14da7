use std::rc::Rc;

use shared::media::{MediaKind, SelectedMedia};
use web_sys::{File, FileList, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MediaPickerProps {
    pub items: Rc<Vec<SelectedMedia<File>>>,
    pub on_select: Callback<FileList>,
    pub on_remove: Callback<usize>,
    #[prop_or_default]
    pub disabled: bool,
}

/// File input for photos and videos with a removable preview strip
#[function_component(MediaPicker)]
pub fn media_picker(props: &MediaPickerProps) -> Html {
    let on_change = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(files) = input.files() {
                on_select.emit(files);
            }
        })
    };

    html! {
        <div class="form-group media-picker">
            <label class="form-label">{"📷 Photos et vidéos"}</label>
            <input
                type="file"
                accept="image/*,video/*"
                multiple=true
                onchange={on_change}
                disabled={props.disabled}
            />
            {if !props.items.is_empty() {
                html! {
                    <div class="media-previews">
                        {for props.items.iter().enumerate().map(|(index, item)| {
                            let on_remove = props.on_remove.clone();
                            html! {
                                <div class="media-preview" key={index}>
                                    {match (item.kind, item.preview.as_ref()) {
                                        (MediaKind::Image, Some(url)) => html! {
                                            <img src={url.clone()} alt={item.file.name()} />
                                        },
                                        _ => html! {
                                            <div class="media-placeholder">
                                                <span>{"🎬"}</span>
                                                <small>{item.file.name()}</small>
                                            </div>
                                        },
                                    }}
                                    <button
                                        type="button"
                                        class="media-remove"
                                        onclick={move |_| on_remove.emit(index)}
                                        disabled={props.disabled}
                                    >
                                        {"×"}
                                    </button>
                                </div>
                            }
                        })}
                    </div>
                }
            } else { html! {} }}
        </div>
    }
}
