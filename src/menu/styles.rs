use bevy::prelude::*;

pub const NORMAL_BUTTON: Color = Color::srgba(0.08, 0.06, 0.16, 0.8);
pub const HOVERED_BUTTON: Color = Color::srgba(0.2, 0.16, 0.38, 0.9);
pub const PRESSED_BUTTON: Color = Color::srgb(0.45, 0.35, 0.75);

pub const BUTTON_TEXT_COLOR: Color = Color::srgb(0.95, 0.92, 1.0);
pub const TITLE_TEXT_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);
pub const HOVER_TEXT_COLOR: Color = Color::srgb(0.8, 0.78, 0.9);

pub fn button_style() -> Node {
    Node {
        width: Val::Px(250.0),
        height: Val::Px(60.0),
        margin: UiRect::all(Val::Px(8.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

pub fn mute_button_style() -> Node {
    Node {
        position_type: PositionType::Absolute,
        right: Val::Px(20.0),
        top: Val::Px(20.0),
        padding: UiRect::axes(Val::Px(14.0), Val::Px(8.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

pub fn button_text_style() -> TextFont {
    TextFont {
        font_size: 28.0,
        ..default()
    }
}

pub fn hover_text_style() -> TextFont {
    TextFont {
        font_size: 20.0,
        ..default()
    }
}

pub fn title_text_style() -> TextFont {
    TextFont {
        font_size: 64.0,
        ..default()
    }
}
