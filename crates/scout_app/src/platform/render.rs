use scout_core::{AppViewModel, Notice, PositionAction, ResultSource, UserAction};

/// Lines describing the whole page, top to bottom.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if !view.mounted {
        lines.push("(search page closed)".to_string());
        return lines;
    }

    let filters = &view.filters;
    lines.push(format!(
        "search: \"{}\"  stage: {}  category: {}  location: {}",
        filters.text, filters.stage, filters.category, filters.location
    ));

    let source = match view.source {
        ResultSource::Bulk => "all listings",
        ResultSource::Server => "filtered",
    };
    let status = if view.searching { "  (searching...)" } else { "" };
    lines.push(format!("{} result(s), {source}{status}", view.results.len()));

    match view.notice {
        Some(Notice::NoMatches) => lines.push("  No listings match these filters.".to_string()),
        Some(Notice::TryAgain) => {
            lines.push("  Results could not be loaded, please try again.".to_string())
        }
        None => {}
    }

    for listing in &view.results {
        let tags: Vec<&str> = [&listing.stage, &listing.category, &listing.location]
            .into_iter()
            .filter_map(|tag| tag.as_deref())
            .collect();
        if tags.is_empty() {
            lines.push(format!("  - {}", listing.title));
        } else {
            lines.push(format!("  - {} [{}]", listing.title, tags.join(", ")));
        }
    }

    if let Some(chat) = &view.chat {
        lines.push(format!(
            "chat {} ({} message(s))",
            chat.conversation,
            chat.messages.len()
        ));
        if chat.failed {
            lines.push("  Messages could not be refreshed.".to_string());
        }
        for message in &chat.messages {
            lines.push(format!(
                "  [{}] {}: {}",
                message.sent_at, message.sender, message.body
            ));
        }
    }

    if let Some(upload) = &view.last_upload {
        match &upload.url {
            _ if upload.in_progress => lines.push(format!("uploading {}...", upload.file_name)),
            Some(url) => lines.push(format!("uploaded {} -> {url}", upload.file_name)),
            None => lines.push(format!("upload of {} failed", upload.file_name)),
        }
    }

    lines
}

pub fn user_action_label(action: UserAction) -> &'static str {
    match action {
        UserAction::EditProfile => "Edit profile",
        UserAction::Connect => "Connect",
        UserAction::Pending => "Pending",
        UserAction::Message => "Message",
    }
}

pub fn position_action_label(action: PositionAction) -> &'static str {
    match action {
        PositionAction::OwnerDisabled => "Apply (disabled, your position)",
        PositionAction::Apply => "Apply",
        PositionAction::Applied => "Applied",
    }
}
