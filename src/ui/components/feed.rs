//! Feed renderer: profile counters and follow button, then one card per post.
//!
//! A post card shows author, title, contents and modified time, then a
//! controls line with the like glyph and count, the liker list (only when
//! someone likes the post) and the edit control. A post in edit mode shows the
//! form instead of its contents.

use super::{button, push_block, push_line, render_border, render_empty_state};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FeedView, PostView, ProfileView};

pub fn render_feed(out: &mut String, view: &FeedView, theme: &Theme, cols: usize) {
    if let Some(profile) = &view.profile {
        render_profile(out, profile, theme, cols);
        render_border(out, &theme.colors.border, cols);
    }

    if let Some(empty) = &view.empty_state {
        render_empty_state(out, empty, theme, cols);
        return;
    }

    for post in &view.posts {
        render_post(out, post, theme, cols);
        render_border(out, &theme.colors.border, cols);
    }
}

fn render_profile(out: &mut String, profile: &ProfileView, theme: &Theme, cols: usize) {
    let count = |value: Option<usize>| value.map_or_else(|| "-".to_string(), |n| n.to_string());
    let counters = format!(
        "Followers: {}  Following: {}",
        count(profile.followers),
        count(profile.following)
    );
    push_line(out, &counters, &theme.colors.text_normal, cols);

    if let Some(label) = &profile.follow_label {
        out.push_str(&button(label, true, theme));
        out.push('\n');
    }
}

fn render_post(out: &mut String, post: &PostView, theme: &Theme, cols: usize) {
    let colors = &theme.colors;

    out.push_str(Theme::bold());
    push_line(out, &format!("#{} {}", post.id, post.author), &colors.text_normal, cols);

    if let Some(editor) = &post.editor {
        push_line(out, &format!("Title: {}", editor.title), &colors.text_normal, cols);
        push_line(out, "Contents:", &colors.text_normal, cols);
        push_block(out, &editor.contents, &colors.text_normal, cols);
        out.push_str(&button("Save", true, theme));
        out.push('\n');
        return;
    }

    out.push_str(Theme::bold());
    push_line(out, &post.title, &colors.text_normal, cols);
    push_block(out, &post.contents, &colors.text_normal, cols);

    let mut modified = post.modified.clone();
    if post.saving {
        modified.push_str(" (saving...)");
    } else if post.loading {
        modified.push_str(" (loading editor...)");
    }
    if !modified.trim().is_empty() {
        push_line(out, modified.trim(), &colors.text_dim, cols);
    }

    let mut controls = String::new();
    match &post.like {
        Some(like) => {
            controls.push_str(&format!(
                "{}{} {}{}",
                Theme::fg(&colors.like_fg),
                like.glyph,
                like.count,
                Theme::reset()
            ));
            if let Some(liked_by) = &like.liked_by {
                controls.push_str(&format!(
                    " {}liked by {liked_by}{}",
                    Theme::fg(&colors.text_dim),
                    Theme::reset()
                ));
            }
        }
        None => controls.push_str(&format!("{}- -{}", Theme::fg(&colors.text_dim), Theme::reset())),
    }
    if let Some(control) = post.edit_control {
        controls.push(' ');
        controls.push_str(&button("Edit", control.enabled, theme));
    }
    out.push_str(&controls);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{EditControl, LikeView, FILLED_HEART};

    fn post() -> PostView {
        PostView {
            id: 7,
            author: "alice".to_string(),
            title: "Title".to_string(),
            contents: "Body".to_string(),
            modified: "Jan. 1".to_string(),
            like: Some(LikeView {
                glyph: FILLED_HEART,
                count: 4,
                liked_by: Some("bob".to_string()),
            }),
            edit_control: Some(EditControl { enabled: false }),
            editor: None,
            loading: false,
            saving: false,
        }
    }

    #[test]
    fn post_controls_show_glyph_count_and_likers() {
        let mut out = String::new();
        render_post(&mut out, &post(), &Theme::default(), 60);

        let controls = out.lines().last().unwrap();
        assert!(controls.contains("\u{2764} 4"));
        assert!(controls.contains("liked by bob"));
        assert!(controls.contains(&Theme::fg(&Theme::default().colors.button_disabled_fg)));
    }
}
