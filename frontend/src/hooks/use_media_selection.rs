use std::rc::Rc;

use shared::media::{MediaSelection, SelectedMedia};
use web_sys::{File, FileList, Url};
use yew::prelude::*;

use crate::services::logging::Logger;

fn create_preview(file: &File) -> Option<String> {
    match Url::create_object_url_with_blob(file) {
        Ok(url) => Some(url),
        Err(e) => {
            Logger::warn_with_component("media", &format!("Failed to create preview: {:?}", e));
            None
        }
    }
}

fn release_previews(urls: Vec<String>) {
    for url in urls {
        if let Err(e) = Url::revoke_object_url(&url) {
            Logger::warn_with_component("media", &format!("Failed to revoke preview: {:?}", e));
        }
    }
}

fn files_with_mime(list: &FileList) -> Vec<(File, String)> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|file| {
            let mime = file.type_();
            (file, mime)
        })
        .collect()
}

pub struct UseMediaSelectionResult {
    pub items: Rc<Vec<SelectedMedia<File>>>,
    pub actions: UseMediaSelectionActions,
}

#[derive(Clone, PartialEq)]
pub struct UseMediaSelectionActions {
    /// Replaces the selection with the files of an `<input type="file">`
    pub select: Callback<FileList>,
    pub remove: Callback<usize>,
    pub clear: Callback<()>,
}

impl UseMediaSelectionResult {
    pub fn files(&self) -> Vec<File> {
        self.items.iter().map(|item| item.file.clone()).collect()
    }
}

/// Files picked for upload along with their object-URL previews.
/// Previews are revoked whenever an entry leaves the selection and when the
/// owning component unmounts.
#[hook]
pub fn use_media_selection() -> UseMediaSelectionResult {
    let selection = use_mut_ref(MediaSelection::<File>::default);
    let force_update = use_force_update();

    {
        let selection = selection.clone();
        use_effect_with((), move |_| {
            move || {
                let released = selection.borrow_mut().clear();
                release_previews(released);
            }
        });
    }

    let select = {
        let selection = selection.clone();
        let force_update = force_update.clone();
        Callback::from(move |list: FileList| {
            let released = selection
                .borrow_mut()
                .replace(files_with_mime(&list), create_preview);
            release_previews(released);
            Logger::debug_with_component("media", &format!("{} file(s) selected", selection.borrow().items().len()));
            force_update.force_update();
        })
    };

    let remove = {
        let selection = selection.clone();
        let force_update = force_update.clone();
        Callback::from(move |index: usize| {
            let released = selection.borrow_mut().remove(index);
            release_previews(released.into_iter().collect());
            force_update.force_update();
        })
    };

    let clear = {
        let selection = selection.clone();
        Callback::from(move |_: ()| {
            let released = selection.borrow_mut().clear();
            release_previews(released);
            force_update.force_update();
        })
    };

    let items = Rc::new(selection.borrow().items().to_vec());

    UseMediaSelectionResult {
        items,
        actions: UseMediaSelectionActions { select, remove, clear },
    }
}
