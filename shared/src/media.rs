use serde::{Deserialize, Serialize};

/// Shown when a user has no profile picture
pub const DEFAULT_AVATAR_URL: &str =
    "https://cdn.pixabay.com/photo/2015/10/05/22/37/blank-profile-picture-973460_960_720.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classifies an uploaded file by MIME type; other types are not accepted
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Some(MediaKind::Image)
        } else if mime.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// Only images get an inline preview
    pub fn has_preview(&self) -> bool {
        matches!(self, MediaKind::Image)
    }
}

/// A file picked for upload, with its preview handle if it has one
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedMedia<F> {
    pub file: F,
    pub kind: MediaKind,
    pub preview: Option<String>,
}

/// Files waiting to be uploaded with a trip or an activity.
///
/// Preview handles are created through a caller-supplied function. Every
/// operation that drops an entry hands its handle back so the caller can
/// release it; nothing here owns browser resources.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSelection<F> {
    items: Vec<SelectedMedia<F>>,
}

impl<F> Default for MediaSelection<F> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<F> MediaSelection<F> {
    pub fn items(&self) -> &[SelectedMedia<F>] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn files(&self) -> impl Iterator<Item = &F> {
        self.items.iter().map(|item| &item.file)
    }

    /// Appends `(file, mime)` pairs. Files that are neither images nor
    /// videos are skipped.
    pub fn add<I, P>(&mut self, files: I, mut make_preview: P)
    where
        I: IntoIterator<Item = (F, String)>,
        P: FnMut(&F) -> Option<String>,
    {
        for (file, mime) in files {
            let Some(kind) = MediaKind::from_mime(&mime) else {
                continue;
            };
            let preview = if kind.has_preview() {
                make_preview(&file)
            } else {
                None
            };
            self.items.push(SelectedMedia { file, kind, preview });
        }
    }

    /// Replaces the whole selection; returns the handles to release
    pub fn replace<I, P>(&mut self, files: I, make_preview: P) -> Vec<String>
    where
        I: IntoIterator<Item = (F, String)>,
        P: FnMut(&F) -> Option<String>,
    {
        let released = self.clear();
        self.add(files, make_preview);
        released
    }

    /// Removes one entry; returns its handle to release
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.items.len() {
            self.items.remove(index).preview
        } else {
            None
        }
    }

    /// Empties the selection; returns every handle to release
    pub fn clear(&mut self) -> Vec<String> {
        self.items.drain(..).filter_map(|item| item.preview).collect()
    }
}

/// Turns a path returned by the API into an absolute URL.
///
/// `server_root` is the backend origin without a trailing slash, e.g.
/// `http://localhost:8000`. Absolute URLs pass through; `/media/x` and
/// `media/x` are anchored at the root; bare names land under `/media/`.
pub fn resolve_media_url(server_root: &str, path: Option<&str>) -> String {
    let Some(path) = path.map(str::trim).filter(|p| !p.is_empty()) else {
        return DEFAULT_AVATAR_URL.to_string();
    };
    let root = server_root.trim_end_matches('/');

    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("blob:") {
        path.to_string()
    } else if path.starts_with("/media/") {
        format!("{}{}", root, path)
    } else if path.starts_with("media/") {
        format!("{}/{}", root, path)
    } else {
        format!("{}/media/{}", root, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview_for(name: &&str) -> Option<String> {
        Some(format!("blob:{}", name))
    }

    fn picked(files: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
        files.iter().map(|(f, m)| (*f, m.to_string())).collect()
    }

    #[test]
    fn test_mime_classification() {
        assert_eq!(MediaKind::from_mime("image/png"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_mime("VIDEO/mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_mime("application/pdf"), None);
        assert!(MediaKind::Image.has_preview());
        assert!(!MediaKind::Video.has_preview());
    }

    #[test]
    fn test_only_images_get_previews_and_others_are_skipped() {
        let mut selection = MediaSelection::default();
        selection.add(
            picked(&[("a.jpg", "image/jpeg"), ("b.mp4", "video/mp4"), ("c.pdf", "application/pdf")]),
            preview_for,
        );

        assert_eq!(selection.items().len(), 2);
        assert_eq!(selection.items()[0].preview.as_deref(), Some("blob:a.jpg"));
        assert_eq!(selection.items()[1].preview, None);
        assert_eq!(selection.files().copied().collect::<Vec<_>>(), vec!["a.jpg", "b.mp4"]);
    }

    #[test]
    fn test_replace_remove_and_clear_release_handles() {
        let mut selection = MediaSelection::default();
        selection.add(picked(&[("a.jpg", "image/jpeg"), ("b.png", "image/png")]), preview_for);

        let released = selection.replace(picked(&[("c.gif", "image/gif"), ("d.webm", "video/webm")]), preview_for);
        assert_eq!(released, vec!["blob:a.jpg", "blob:b.png"]);

        assert_eq!(selection.remove(1), None);
        assert_eq!(selection.remove(5), None);
        assert_eq!(selection.remove(0), Some("blob:c.gif".to_string()));
        assert!(selection.is_empty());

        selection.add(picked(&[("e.jpg", "image/jpeg")]), preview_for);
        assert_eq!(selection.clear(), vec!["blob:e.jpg"]);
        assert!(selection.clear().is_empty());
    }

    #[test]
    fn test_media_paths_are_anchored_at_server_root() {
        let root = "http://localhost:8000/";
        assert_eq!(
            resolve_media_url(root, Some("/media/a.jpg")),
            "http://localhost:8000/media/a.jpg"
        );
        assert_eq!(
            resolve_media_url(root, Some("media/a.jpg")),
            "http://localhost:8000/media/a.jpg"
        );
        assert_eq!(
            resolve_media_url(root, Some("profiles/a.jpg")),
            "http://localhost:8000/media/profiles/a.jpg"
        );
        assert_eq!(
            resolve_media_url(root, Some("https://cdn.example.org/a.jpg")),
            "https://cdn.example.org/a.jpg"
        );
    }

    #[test]
    fn test_missing_path_uses_default_avatar() {
        assert_eq!(resolve_media_url("http://x", None), DEFAULT_AVATAR_URL);
        assert_eq!(resolve_media_url("http://x", Some("  ")), DEFAULT_AVATAR_URL);
    }
}
