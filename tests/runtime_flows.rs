//! End-to-end flows through the runtime against a mocked backend.

use mailfeed::api::Backend;
use mailfeed::app::{AppKind, AppState, Event, Panel, PostMode};
use mailfeed::domain::{
    ComposeDraft, Email, EmailId, EmailPatch, FeedPage, FollowSummary, FollowToggle, LikeSummary,
    LikeToggle, Mailbox, MailfeedError, PostCard, PostFields, PostId, PostRecord, SendReceipt,
};
use mailfeed::runtime::Runtime;
use mailfeed::ui::{PanelView, Theme, UIViewModel};
use mailfeed::Result;
use mockall::mock;
use mockall::predicate::eq;

mock! {
    pub Api {}

    impl Backend for Api {
        fn list_mailbox(&self, mailbox: Mailbox) -> Result<Vec<Email>>;
        fn get_email(&self, id: EmailId) -> Result<Email>;
        fn update_email(&self, id: EmailId, patch: EmailPatch) -> Result<()>;
        fn send_email(&self, draft: &ComposeDraft) -> Result<SendReceipt>;
        fn get_post(&self, id: PostId) -> Result<PostRecord>;
        fn edit_post(&self, id: PostId, fields: &PostFields) -> Result<PostRecord>;
        fn get_likes(&self, id: PostId) -> Result<LikeSummary>;
        fn toggle_like(&self, id: PostId) -> Result<LikeToggle>;
        fn get_follow(&self, username: &str) -> Result<FollowSummary>;
        fn toggle_follow(&self, username: &str) -> Result<FollowToggle>;
    }
}

fn email(id: EmailId, subject: &str, read: bool) -> Email {
    Email {
        id,
        sender: "a@x.com".to_string(),
        recipients: vec!["me@x.com".to_string()],
        subject: subject.to_string(),
        body: "Hello there".to_string(),
        timestamp: "Jan 1 2021, 12:00 PM".to_string(),
        read,
        archived: false,
    }
}

fn card(id: PostId, editable: bool) -> PostCard {
    PostCard {
        id,
        author: "alice".to_string(),
        title: format!("Post {id}"),
        contents: "original".to_string(),
        modified: "Jan 1 2021".to_string(),
        editable,
    }
}

fn record(title: &str, contents: &str, modified: &str) -> PostRecord {
    PostRecord {
        user_id: Some(1),
        title: title.to_string(),
        contents: contents.to_string(),
        created: "Jan 1 2021".to_string(),
        modified: modified.to_string(),
    }
}

fn mail_runtime(api: MockApi) -> Runtime<MockApi> {
    Runtime::new(AppState::new(AppKind::Mail, Theme::default()), api)
}

fn feed_runtime(api: MockApi) -> Runtime<MockApi> {
    Runtime::new(AppState::new(AppKind::Network, Theme::default()), api)
}

fn viewmodel(runtime: &Runtime<MockApi>) -> UIViewModel {
    runtime.state().compute_viewmodel()
}

/// Expects the page-load like fetch for `id` with `count` likes.
fn expect_likes(api: &mut MockApi, id: PostId, count: u32, is_liked: bool) {
    api.expect_get_likes()
        .with(eq(id))
        .times(1)
        .returning(move |_| {
            Ok(LikeSummary {
                is_liked,
                like_count: count,
                liked_by: vec!["bob".to_string(); count as usize],
            })
        });
}

#[test]
fn inbox_with_one_unread_email_renders_one_highlighted_row() {
    let mut api = MockApi::new();
    api.expect_list_mailbox()
        .with(eq(Mailbox::Inbox))
        .times(1)
        .returning(|_| Ok(vec![email(1, "Hi", false)]));

    let mut runtime = mail_runtime(api);
    assert!(runtime.dispatch(Event::LoadMailbox(Mailbox::Inbox)).unwrap());

    let vm = viewmodel(&runtime);
    let PanelView::Mailbox(mailbox) = vm.body else {
        panic!("expected the mailbox panel");
    };
    assert_eq!(mailbox.title, "Inbox");
    assert_eq!(mailbox.rows.len(), 1);
    assert_eq!(mailbox.rows[0].subject, "Hi");
    assert_eq!(mailbox.rows[0].sender, "a@x.com");
    assert_eq!(mailbox.rows[0].background, "#D3D3D3");

    let screen = runtime.render(80);
    assert!(screen.contains("Hi"));
    assert!(screen.contains("\u{1b}[48;2;211;211;211m"));
}

#[test]
fn every_mailbox_shows_one_row_per_item_and_one_panel() {
    let mut api = MockApi::new();
    api.expect_list_mailbox().times(3).returning(|mailbox| {
        let count = match mailbox {
            Mailbox::Inbox => 2,
            Mailbox::Sent => 0,
            Mailbox::Archive => 3,
        };
        Ok((1..=count).map(|id| email(id, "subject", true)).collect())
    });

    let mut runtime = mail_runtime(api);
    for (mailbox, expected) in Mailbox::ALL.into_iter().zip([2, 0, 3]) {
        runtime.dispatch(Event::LoadMailbox(mailbox)).unwrap();

        let state = runtime.state();
        assert_eq!(state.mail.panel, Panel::Mailbox);
        assert_eq!(state.mail.mailbox, mailbox);

        let vm = viewmodel(&runtime);
        let PanelView::Mailbox(view) = vm.body else {
            panic!("expected the mailbox panel");
        };
        assert_eq!(view.rows.len(), expected);
        assert_eq!(view.empty_state.is_some(), expected == 0);
        assert!(view.rows.iter().all(|row| row.background == "#FFFFFF"));
    }
}

#[test]
fn opening_an_email_shows_it_and_marks_it_read() {
    let mut api = MockApi::new();
    api.expect_get_email()
        .with(eq(5))
        .times(1)
        .returning(|id| Ok(email(id, "Lunch", false)));
    api.expect_update_email()
        .withf(|id, patch| *id == 5 && *patch == EmailPatch::mark_read())
        .times(1)
        .returning(|_, _| Ok(()));

    let mut runtime = mail_runtime(api);
    runtime.dispatch(Event::OpenEmail(5)).unwrap();

    assert_eq!(runtime.state().mail.panel, Panel::Email);
    let vm = viewmodel(&runtime);
    let PanelView::Email(Some(view)) = vm.body else {
        panic!("expected a loaded email");
    };
    assert_eq!(view.subject, "Lunch");
    assert_eq!(view.recipients, "me@x.com");
    assert_eq!(view.archive_label, "Archive");
}

#[test]
fn failed_mark_read_is_only_logged() {
    let mut api = MockApi::new();
    api.expect_get_email().returning(|id| Ok(email(id, "Lunch", false)));
    api.expect_update_email()
        .returning(|_, _| Err(MailfeedError::Transport("connection reset".to_string())));

    let mut runtime = mail_runtime(api);
    runtime.dispatch(Event::OpenEmail(5)).unwrap();

    assert!(runtime.take_alerts().is_empty());
    assert_eq!(runtime.state().mail.status, None);
    assert_eq!(runtime.state().mail.panel, Panel::Email);
}

#[test]
fn replying_to_a_reply_keeps_a_single_prefix() {
    let mut api = MockApi::new();
    api.expect_get_email()
        .returning(|id| Ok(email(id, "Re: Lunch", true)));
    api.expect_update_email().returning(|_, _| Ok(()));

    let mut runtime = mail_runtime(api);
    runtime.dispatch(Event::OpenEmail(9)).unwrap();
    runtime.dispatch(Event::Reply).unwrap();

    let draft = &runtime.state().mail.draft;
    assert_eq!(runtime.state().mail.panel, Panel::Compose);
    assert_eq!(draft.recipients, "a@x.com");
    assert_eq!(draft.subject, "Re: Lunch");
    assert_eq!(draft.body, "On Jan 1 2021, 12:00 PM, a@x.com wrote: Hello there");
}

#[test]
fn archive_toggle_stores_the_flag_then_shows_the_inbox() {
    let mut api = MockApi::new();
    api.expect_get_email().returning(|id| Ok(email(id, "Lunch", true)));
    api.expect_update_email()
        .withf(|_, patch| *patch == EmailPatch::mark_read())
        .returning(|_, _| Ok(()));
    api.expect_update_email()
        .withf(|id, patch| *id == 4 && *patch == EmailPatch::archived(true))
        .times(1)
        .returning(|_, _| Ok(()));
    api.expect_list_mailbox()
        .with(eq(Mailbox::Inbox))
        .times(1)
        .returning(|_| Ok(vec![]));

    let mut runtime = mail_runtime(api);
    runtime.dispatch(Event::OpenEmail(4)).unwrap();
    runtime.dispatch(Event::ToggleArchive).unwrap();

    let state = runtime.state();
    assert_eq!(state.mail.panel, Panel::Mailbox);
    assert_eq!(state.mail.mailbox, Mailbox::Inbox);
    assert!(state.mail.open_email.is_none());
}

#[test]
fn failed_archive_stays_on_the_email_with_a_status() {
    let mut api = MockApi::new();
    api.expect_get_email().returning(|id| Ok(email(id, "Lunch", true)));
    api.expect_update_email()
        .withf(|_, patch| *patch == EmailPatch::mark_read())
        .returning(|_, _| Ok(()));
    api.expect_update_email()
        .withf(|_, patch| patch.archived.is_some())
        .returning(|_, _| Err(MailfeedError::Status { status: 500, endpoint: "/emails/4".to_string() }));
    api.expect_list_mailbox().never();

    let mut runtime = mail_runtime(api);
    runtime.dispatch(Event::OpenEmail(4)).unwrap();
    runtime.dispatch(Event::ToggleArchive).unwrap();

    let vm = viewmodel(&runtime);
    assert_eq!(runtime.state().mail.panel, Panel::Email);
    assert_eq!(
        vm.status.map(|status| status.message),
        Some("Server unavailable: Unexpected status 500 from /emails/4".to_string())
    );
}

#[test]
fn successful_send_shows_sent_and_alerts_the_confirmation() {
    let mut api = MockApi::new();
    api.expect_send_email()
        .withf(|draft| draft.recipients == "b@x.com" && draft.subject == "Hi" && draft.body == "one\ntwo")
        .times(1)
        .returning(|_| Ok(SendReceipt { message: "Email sent successfully.".to_string() }));
    api.expect_list_mailbox()
        .with(eq(Mailbox::Sent))
        .times(1)
        .returning(|_| Ok(vec![email(10, "Hi", true)]));

    let mut runtime = mail_runtime(api);
    for event in [
        Event::Compose,
        Event::SetRecipients("b@x.com".to_string()),
        Event::SetSubject("Hi".to_string()),
        Event::SetBody("one\ntwo".to_string()),
        Event::SendEmail,
    ] {
        runtime.dispatch(event).unwrap();
    }

    let state = runtime.state();
    assert_eq!(state.mail.panel, Panel::Mailbox);
    assert_eq!(state.mail.mailbox, Mailbox::Sent);
    assert_eq!(state.mail.emails.len(), 1);
    assert_eq!(state.mail.draft, ComposeDraft::default());
    assert_eq!(runtime.take_alerts(), vec!["Email sent successfully.".to_string()]);
}

#[test]
fn rejected_send_keeps_the_form_and_reports_the_backend_message() {
    let message = "User with email nobody@x.com does not exist.";
    let mut api = MockApi::new();
    api.expect_send_email()
        .times(1)
        .returning(move |_| Err(MailfeedError::Application(message.to_string())));
    api.expect_list_mailbox().never();

    let mut runtime = mail_runtime(api);
    runtime.dispatch(Event::Compose).unwrap();
    runtime.dispatch(Event::SetRecipients("nobody@x.com".to_string())).unwrap();
    runtime.dispatch(Event::SendEmail).unwrap();

    let state = runtime.state();
    assert_eq!(state.mail.panel, Panel::Compose);
    assert_eq!(state.mail.draft.recipients, "nobody@x.com");
    assert_eq!(state.mail.status.as_deref(), Some(message));
    assert_eq!(runtime.take_alerts(), vec![message.to_string()]);
}

#[test]
fn liking_post_seven_fills_the_heart_and_counts_up() {
    let mut api = MockApi::new();
    expect_likes(&mut api, 7, 3, false);
    let mut liked = false;
    api.expect_toggle_like()
        .with(eq(7))
        .times(2)
        .returning(move |_| {
            liked = !liked;
            Ok(LikeToggle { post_liked: liked })
        });

    let mut runtime = feed_runtime(api);
    runtime
        .dispatch(Event::FeedLoaded(FeedPage { profile: None, posts: vec![card(7, false)] }))
        .unwrap();

    let like = |runtime: &Runtime<MockApi>| {
        let PanelView::Feed(feed) = viewmodel(runtime).body else {
            panic!("expected the feed");
        };
        feed.posts[0].like.clone().unwrap()
    };

    let before = like(&runtime);
    assert_eq!((before.glyph, before.count), ('\u{2661}', 3));

    runtime.dispatch(Event::ToggleLike { post_id: 7 }).unwrap();
    let after = like(&runtime);
    assert_eq!((after.glyph, after.count), ('\u{2764}', 4));

    runtime.dispatch(Event::ToggleLike { post_id: 7 }).unwrap();
    let again = like(&runtime);
    assert_eq!((again.glyph, again.count), ('\u{2661}', 3));
}

#[test]
fn anonymous_like_raises_the_backend_message() {
    let mut api = MockApi::new();
    expect_likes(&mut api, 7, 3, false);
    api.expect_toggle_like()
        .returning(|_| Err(MailfeedError::Application("You must log in to like a post!".to_string())));

    let mut runtime = feed_runtime(api);
    runtime
        .dispatch(Event::FeedLoaded(FeedPage { profile: None, posts: vec![card(7, false)] }))
        .unwrap();
    runtime.dispatch(Event::ToggleLike { post_id: 7 }).unwrap();

    assert_eq!(runtime.take_alerts(), vec!["You must log in to like a post!".to_string()]);
    let likes = runtime.state().feed.post(7).and_then(|post| post.likes.clone()).unwrap();
    assert_eq!(likes.like_count, 3);
}

#[test]
fn failed_like_state_load_is_silent() {
    let mut api = MockApi::new();
    api.expect_get_likes()
        .returning(|_| Err(MailfeedError::Transport("timed out".to_string())));

    let mut runtime = feed_runtime(api);
    runtime
        .dispatch(Event::FeedLoaded(FeedPage { profile: None, posts: vec![card(1, false)] }))
        .unwrap();

    assert!(runtime.take_alerts().is_empty());
    let PanelView::Feed(feed) = viewmodel(&runtime).body else {
        panic!("expected the feed");
    };
    assert_eq!(feed.posts[0].like, None);
}

#[test]
fn follow_toggle_flips_label_and_follower_count() {
    let mut api = MockApi::new();
    api.expect_get_follow()
        .withf(|username| username == "alice")
        .times(1)
        .returning(|_| {
            Ok(FollowSummary {
                followers: vec![1, 2],
                following: vec![3],
                is_following: false,
                user_logged_in: true,
            })
        });
    let mut following = false;
    api.expect_toggle_follow()
        .withf(|username| username == "alice")
        .times(2)
        .returning(move |_| {
            following = !following;
            Ok(FollowToggle { is_following: following })
        });

    let mut runtime = feed_runtime(api);
    runtime
        .dispatch(Event::FeedLoaded(FeedPage { profile: Some("alice".to_string()), posts: vec![] }))
        .unwrap();

    let profile = |runtime: &Runtime<MockApi>| {
        let PanelView::Feed(feed) = viewmodel(runtime).body else {
            panic!("expected the feed");
        };
        let profile = feed.profile.unwrap();
        (profile.follow_label.unwrap(), profile.followers.unwrap(), profile.following.unwrap())
    };

    assert_eq!(profile(&runtime), ("Follow".to_string(), 2, 1));
    runtime.dispatch(Event::ToggleFollow).unwrap();
    assert_eq!(profile(&runtime), ("Unfollow".to_string(), 3, 1));
    runtime.dispatch(Event::ToggleFollow).unwrap();
    assert_eq!(profile(&runtime), ("Follow".to_string(), 2, 1));
}

#[test]
fn own_profile_has_no_follow_button() {
    let mut api = MockApi::new();
    api.expect_get_follow().returning(|_| {
        Ok(FollowSummary {
            followers: vec![],
            following: vec![],
            is_following: false,
            user_logged_in: false,
        })
    });
    api.expect_toggle_follow().never();

    let mut runtime = feed_runtime(api);
    runtime
        .dispatch(Event::FeedLoaded(FeedPage { profile: Some("me".to_string()), posts: vec![] }))
        .unwrap();
    assert!(!runtime.dispatch(Event::ToggleFollow).unwrap());
}

#[test]
fn only_one_editor_can_be_open_at_a_time() {
    let mut api = MockApi::new();
    api.expect_get_likes()
        .returning(|_| Ok(LikeSummary::default()));
    api.expect_get_post()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(record("Post 1", "original", "Jan 1 2021")));
    api.expect_edit_post()
        .withf(|id, fields| *id == 1 && fields.title == "New title" && fields.contents == "original")
        .times(1)
        .returning(|_, fields| Ok(record(&fields.title, &fields.contents, "Feb 2 2021")));

    let mut runtime = feed_runtime(api);
    runtime
        .dispatch(Event::FeedLoaded(FeedPage { profile: None, posts: vec![card(1, true), card(2, true)] }))
        .unwrap();

    runtime.dispatch(Event::OpenEditor { post_id: 1 }).unwrap();
    assert_eq!(runtime.state().feed.edit_lock, Some(1));
    assert!(!runtime.dispatch(Event::OpenEditor { post_id: 2 }).unwrap());

    let PanelView::Feed(feed) = viewmodel(&runtime).body else {
        panic!("expected the feed");
    };
    assert!(feed.posts[0].editor.is_some());
    assert_eq!(feed.posts[1].edit_control.map(|control| control.enabled), Some(false));

    runtime.dispatch(Event::SetEditTitle("New title".to_string())).unwrap();
    runtime.dispatch(Event::SubmitEdit).unwrap();

    let state = runtime.state();
    assert_eq!(state.feed.edit_lock, None);
    let post = state.feed.post(1).unwrap();
    assert_eq!(post.mode, PostMode::Display);
    assert_eq!(post.card.title, "New title");
    assert_eq!(post.card.modified, "Feb 2 2021");

    let PanelView::Feed(feed) = viewmodel(&runtime).body else {
        panic!("expected the feed");
    };
    assert!(feed
        .posts
        .iter()
        .all(|post| post.edit_control.map(|control| control.enabled) == Some(true)));
}

#[test]
fn failed_edit_restores_the_previous_text_and_releases_the_lock() {
    let mut api = MockApi::new();
    api.expect_get_likes()
        .returning(|_| Ok(LikeSummary::default()));
    api.expect_get_post()
        .returning(|_| Ok(record("Post 3", "original", "Jan 1 2021")));
    api.expect_edit_post()
        .returning(|_, _| Err(MailfeedError::Application("Post contents cannot be empty.".to_string())));

    let mut runtime = feed_runtime(api);
    runtime
        .dispatch(Event::FeedLoaded(FeedPage { profile: None, posts: vec![card(3, true)] }))
        .unwrap();
    runtime.dispatch(Event::OpenEditor { post_id: 3 }).unwrap();
    runtime.dispatch(Event::SetEditContents(String::new())).unwrap();
    runtime.dispatch(Event::SubmitEdit).unwrap();

    let state = runtime.state();
    let post = state.feed.post(3).unwrap();
    assert_eq!(post.mode, PostMode::Display);
    assert_eq!(post.card.contents, "original");
    assert_eq!(state.feed.edit_lock, None);
    assert_eq!(runtime.take_alerts(), vec!["Post contents cannot be empty.".to_string()]);
}

#[test]
fn editing_someone_elses_post_is_refused_by_the_backend() {
    let mut api = MockApi::new();
    api.expect_get_likes()
        .returning(|_| Ok(LikeSummary::default()));
    api.expect_get_post()
        .returning(|_| Err(MailfeedError::Application("You can only edit your own posts.".to_string())));
    api.expect_edit_post().never();

    let mut runtime = feed_runtime(api);
    runtime
        .dispatch(Event::FeedLoaded(FeedPage { profile: None, posts: vec![card(8, true)] }))
        .unwrap();
    runtime.dispatch(Event::OpenEditor { post_id: 8 }).unwrap();

    let state = runtime.state();
    assert_eq!(state.feed.edit_lock, None);
    assert_eq!(state.feed.post(8).map(|post| post.mode.clone()), Some(PostMode::Display));
    assert_eq!(runtime.take_alerts().len(), 1);
}
