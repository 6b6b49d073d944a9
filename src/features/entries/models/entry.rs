use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use sqlx::FromRow;

use super::{EntryComment, EntryImage};
use crate::features::categories::models::Category;
use crate::features::users::User;
use crate::shared::constants::AUTHOR_PLACEHOLDER;

/// A bill-board post.
///
/// Timestamps are maintained by [`Entry::on_create`] and
/// [`Entry::on_update`], which the service calls right before the row is
/// written. Images and comments are owned by the entry and only change
/// through the `add_*`/`remove_*` methods.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    id: Option<i32>,
    title: String,
    description: String,
    time: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    category: Option<Category>,
    author: Option<User>,
    visible: bool,
    closed: bool,
    images: Vec<EntryImage>,
    comments: Vec<EntryComment>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the creation time, then refresh `updated_at`.
    ///
    /// `time` is only ever set once; calling this again leaves it alone.
    pub fn on_create(&mut self) {
        self.stamp_created(stamp_now());
    }

    /// Refresh `updated_at`. Never touches `time`.
    pub fn on_update(&mut self) {
        self.touch(stamp_now());
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        if self.time.is_none() {
            self.time = Some(now);
        }
        self.touch(now);
    }

    // updated_at never moves backwards and never precedes time
    fn touch(&mut self, now: DateTime<Utc>) {
        let floor = self.updated_at.max(self.time);
        self.updated_at = Some(floor.map_or(now, |floor| floor.max(now)));
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    /// Assign the generated id once the row exists
    pub(crate) fn mark_persisted(&mut self, id: i32) {
        self.id = Some(id);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = Some(category);
    }

    pub fn author(&self) -> Option<&User> {
        self.author.as_ref()
    }

    pub fn set_author(&mut self, author: Option<User>) {
        self.author = author;
    }

    /// Account name of the author, if the reference is still set
    pub fn author_act(&self) -> Option<&str> {
        self.author.as_ref().map(|author| author.act.as_str())
    }

    /// Whether the author reference is set and the account still exists
    pub fn has_valid_author(&self) -> bool {
        self.author.as_ref().is_some_and(|author| !author.is_deleted())
    }

    /// Author name for display, `?` if the author is gone
    pub fn author_display(&self) -> String {
        match &self.author {
            Some(author) if self.has_valid_author() => author.to_string(),
            _ => AUTHOR_PLACEHOLDER.to_string(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    pub fn images(&self) -> &[EntryImage] {
        &self.images
    }

    pub fn add_image(&mut self, image: EntryImage) {
        self.images.push(image);
    }

    pub fn remove_image(&mut self, image: &EntryImage) {
        if let Some(index) = self.images.iter().position(|i| i == image) {
            self.images.remove(index);
        }
    }

    pub fn comments(&self) -> &[EntryComment] {
        &self.comments
    }

    pub fn add_comment(&mut self, comment: EntryComment) {
        self.comments.push(comment);
    }

    pub fn remove_comment(&mut self, comment: &EntryComment) {
        if let Some(index) = self.comments.iter().position(|c| c == comment) {
            self.comments.remove(index);
        }
    }
}

// timestamptz keeps microseconds; stamp at that precision so the entity
// matches the row it is written to
fn stamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Entry joined with its category and (left joined) author
#[derive(Debug, FromRow)]
pub struct EntryRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub time: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub visible: bool,
    pub closed: bool,
    pub category_id: i32,
    pub category_title: String,
    pub category_description: String,
    pub author_act: Option<String>,
    pub author_firstname: Option<String>,
    pub author_lastname: Option<String>,
    pub author_deleted: Option<DateTime<Utc>>,
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        let author = row.author_act.map(|act| User {
            act,
            firstname: row.author_firstname.unwrap_or_default(),
            lastname: row.author_lastname.unwrap_or_default(),
            deleted: row.author_deleted,
        });

        Self {
            id: Some(row.id),
            title: row.title,
            description: row.description,
            time: Some(row.time),
            updated_at: Some(row.updated_at),
            category: Some(Category {
                id: row.category_id,
                title: row.category_title,
                description: row.category_description,
            }),
            author,
            visible: row.visible,
            closed: row.closed,
            images: Vec::new(),
            comments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    fn events() -> Category {
        Category {
            id: 1,
            title: "Events".to_string(),
            description: "School events".to_string(),
        }
    }

    fn author(deleted: Option<DateTime<Utc>>) -> User {
        User {
            act: "max.mustermann".to_string(),
            firstname: "Max".to_string(),
            lastname: "Mustermann".to_string(),
            deleted,
        }
    }

    fn image(id: i32) -> EntryImage {
        EntryImage {
            id,
            entry: 1,
            image: format!("images/{}.png", id),
            description: None,
            author: None,
            time: Utc::now(),
        }
    }

    #[test]
    fn test_assembly_is_stamped_once_on_create() {
        let mut entry = Entry::new();
        entry.set_title("Assembly");
        entry.set_description("Monday 9am");
        entry.set_category(events());
        entry.set_visible(true);
        entry.set_closed(false);

        entry.on_create();

        assert!(entry.time().is_some());
        assert_eq!(entry.time(), entry.updated_at());
        assert_eq!(entry.author_display(), "?");
        assert_eq!(entry.to_string(), "Assembly");
        assert!(entry.id().is_none());
    }

    #[test]
    fn test_stamps_have_database_precision() {
        let mut entry = Entry::new();
        entry.on_create();
        entry.on_update();

        for stamp in [entry.time(), entry.updated_at()] {
            let stamp = stamp.unwrap();
            assert_eq!(stamp.timestamp_subsec_nanos() % 1_000, 0);
        }
    }

    #[test]
    fn test_display_is_title_verbatim() {
        let title: String = Sentence(2..6).fake();
        let mut entry = Entry::new();
        entry.set_title(title.clone());

        assert_eq!(entry.to_string(), title);
    }

    #[test]
    fn test_time_is_immutable_after_create() {
        let mut entry = Entry::new();
        let created = Utc::now() - Duration::hours(2);
        entry.stamp_created(created);

        entry.stamp_created(created + Duration::hours(1));
        assert_eq!(entry.time(), Some(created));

        entry.on_update();
        assert_eq!(entry.time(), Some(created));
    }

    #[test]
    fn test_updated_at_never_moves_backwards() {
        let mut entry = Entry::new();
        let created = Utc::now();
        entry.stamp_created(created);

        let later = created + Duration::minutes(5);
        entry.touch(later);
        assert_eq!(entry.updated_at(), Some(later));

        entry.touch(created - Duration::minutes(5));
        assert_eq!(entry.updated_at(), Some(later));
        assert!(entry.updated_at() >= entry.time());
    }

    #[test]
    fn test_missing_author_degrades_to_placeholder() {
        let entry = Entry::new();
        assert!(!entry.has_valid_author());
        assert_eq!(entry.author_display(), AUTHOR_PLACEHOLDER);
    }

    #[test]
    fn test_deleted_author_degrades_to_placeholder() {
        let mut entry = Entry::new();
        entry.set_author(Some(author(Some(Utc::now()))));

        assert!(!entry.has_valid_author());
        assert_eq!(entry.author_display(), "?");
        assert_eq!(entry.author_act(), Some("max.mustermann"));
    }

    #[test]
    fn test_valid_author_is_displayed() {
        let mut entry = Entry::new();
        let max = author(None);
        entry.set_author(Some(max.clone()));

        assert!(entry.has_valid_author());
        assert_eq!(entry.author_display(), max.to_string());
        assert_eq!(entry.author(), Some(&max));
    }

    #[test]
    fn test_image_round_trip() {
        let mut entry = Entry::new();
        let first = image(1);
        let second = image(2);

        entry.add_image(first.clone());
        entry.add_image(second.clone());
        assert_eq!(entry.images().len(), 2);

        entry.remove_image(&first);
        assert_eq!(entry.images(), &[second.clone()]);

        // absent image is a no-op
        entry.remove_image(&first);
        assert_eq!(entry.images(), &[second]);
    }

    #[test]
    fn test_comment_round_trip() {
        let mut entry = Entry::new();
        let comment = EntryComment {
            id: 7,
            entry: 1,
            title: "Thanks".to_string(),
            content: "See you there".to_string(),
            author: Some("erika.musterfrau".to_string()),
            time: Utc::now(),
        };

        entry.add_comment(comment.clone());
        assert_eq!(entry.comments().len(), 1);

        entry.remove_comment(&comment);
        assert!(entry.comments().is_empty());
    }

    #[test]
    fn test_row_without_author_has_no_author() {
        let now = Utc::now();
        let entry = Entry::from(EntryRow {
            id: 3,
            title: "Assembly".to_string(),
            description: "Monday 9am".to_string(),
            time: now,
            updated_at: now,
            visible: true,
            closed: false,
            category_id: 1,
            category_title: "Events".to_string(),
            category_description: "School events".to_string(),
            author_act: None,
            author_firstname: None,
            author_lastname: None,
            author_deleted: None,
        });

        assert_eq!(entry.id(), Some(3));
        assert_eq!(entry.category(), Some(&events()));
        assert!(entry.author().is_none());
        assert_eq!(entry.author_display(), "?");
    }
}
