//! Emoji shortcode lookup and reaction summaries.

use lazy_static::lazy_static;
use lnr::CommentReaction;
use std::collections::HashMap;

lazy_static! {
    static ref EMOJI: HashMap<&'static str, &'static str> = [
        // gestures
        ("+1", "👍"),
        ("thumbsup", "👍"),
        ("-1", "👎"),
        ("thumbsdown", "👎"),
        ("wave", "👋"),
        ("raised_back_of_hand", "🤚"),
        ("raised_hand", "✋"),
        ("hand", "✋"),
        ("vulcan_salute", "🖖"),
        ("ok_hand", "👌"),
        ("pinched_fingers", "🤌"),
        ("pinching_hand", "🤏"),
        ("v", "✌️"),
        ("crossed_fingers", "🤞"),
        ("love_you_gesture", "🤟"),
        ("metal", "🤘"),
        ("call_me_hand", "🤙"),
        ("point_left", "👈"),
        ("point_right", "👉"),
        ("point_up_2", "👆"),
        ("point_down", "👇"),
        ("point_up", "☝️"),
        ("fist", "✊"),
        ("fist_raised", "✊"),
        ("facepunch", "👊"),
        ("punch", "👊"),
        ("fist_oncoming", "👊"),
        ("fist_left", "🤛"),
        ("fist_right", "🤜"),
        ("clap", "👏"),
        ("raised_hands", "🙌"),
        ("open_hands", "👐"),
        ("palms_up_together", "🤲"),
        ("handshake", "🤝"),
        ("pray", "🙏"),
        ("writing_hand", "✍️"),
        ("nail_care", "💅"),
        ("selfie", "🤳"),
        ("muscle", "💪"),
        ("mechanical_arm", "🦾"),
        ("eyes", "👀"),
        ("eye", "👁️"),
        ("tongue", "👅"),
        ("lips", "👄"),
        // smileys
        ("grinning", "😀"),
        ("smile", "😊"),
        ("grin", "😁"),
        ("joy", "😂"),
        ("rofl", "🤣"),
        ("smiley", "😃"),
        ("sweat_smile", "😅"),
        ("laughing", "😆"),
        ("laugh", "😄"),
        ("wink", "😉"),
        ("blush", "😊"),
        ("yum", "😋"),
        ("sunglasses", "😎"),
        ("heart_eyes", "😍"),
        ("kissing_heart", "💋"),
        ("kissing", "😗"),
        ("relaxed", "☺️"),
        ("stuck_out_tongue", "😛"),
        ("stuck_out_tongue_winking_eye", "😜"),
        ("stuck_out_tongue_closed_eyes", "😝"),
        ("disappointed", "😞"),
        ("worried", "😟"),
        ("angry", "😠"),
        ("rage", "😡"),
        ("pout", "😡"),
        ("cry", "😢"),
        ("persevere", "😣"),
        ("triumph", "😤"),
        ("disappointed_relieved", "😥"),
        ("frowning", "😦"),
        ("anguished", "😧"),
        ("fearful", "😨"),
        ("weary", "😩"),
        ("sleepy", "😪"),
        ("tired_face", "😫"),
        ("grimacing", "😬"),
        ("sob", "😭"),
        ("open_mouth", "😮"),
        ("hushed", "😯"),
        ("cold_sweat", "😰"),
        ("scream", "😱"),
        ("astonished", "😲"),
        ("flushed", "😳"),
        ("sleeping", "😴"),
        ("dizzy_face", "😵"),
        ("no_mouth", "😶"),
        ("mask", "😷"),
        ("neutral_face", "😐"),
        ("expressionless", "😑"),
        ("unamused", "😒"),
        ("sweat", "😓"),
        ("pensive", "😔"),
        ("confused", "😕"),
        ("confounded", "😖"),
        ("upside_down_face", "🙃"),
        ("money_mouth_face", "🤑"),
        ("thinking_face", "🤔"),
        ("thinking", "🤔"),
        ("zipper_mouth_face", "🤐"),
        ("nerd_face", "🤓"),
        ("hugs", "🤗"),
        ("rolling_eyes", "🙄"),
        ("smirk", "😏"),
        ("drooling_face", "🤤"),
        ("lying_face", "🤥"),
        ("face_with_raised_eyebrow", "🤨"),
        ("shushing_face", "🤫"),
        ("face_with_hand_over_mouth", "🤭"),
        ("face_vomiting", "🤮"),
        ("exploding_head", "🤯"),
        ("cowboy_hat_face", "🤠"),
        ("partying_face", "🥳"),
        ("disguised_face", "🥸"),
        ("pleading_face", "🥺"),
        ("skull", "💀"),
        ("skull_and_crossbones", "☠️"),
        ("ghost", "👻"),
        ("alien", "👽"),
        ("robot", "🤖"),
        ("poop", "💩"),
        ("hankey", "💩"),
        ("clown_face", "🤡"),
        // hearts
        ("heart", "❤️"),
        ("red_heart", "❤️"),
        ("orange_heart", "🧡"),
        ("yellow_heart", "💛"),
        ("green_heart", "💚"),
        ("blue_heart", "💙"),
        ("purple_heart", "💜"),
        ("black_heart", "🖤"),
        ("white_heart", "🤍"),
        ("brown_heart", "🤎"),
        ("broken_heart", "💔"),
        ("heart_exclamation", "❣️"),
        ("two_hearts", "💕"),
        ("revolving_hearts", "💞"),
        ("heartbeat", "💓"),
        ("heartpulse", "💗"),
        ("sparkling_heart", "💖"),
        ("cupid", "💘"),
        ("gift_heart", "💝"),
        ("heart_decoration", "💟"),
        // celebration
        ("tada", "🎉"),
        ("confetti_ball", "🎊"),
        ("balloon", "🎈"),
        ("birthday", "🎂"),
        ("gift", "🎁"),
        ("trophy", "🏆"),
        ("medal_military", "🎖️"),
        ("medal_sports", "🏅"),
        ("first_place_medal", "🥇"),
        ("second_place_medal", "🥈"),
        ("third_place_medal", "🥉"),
        // symbols
        ("fire", "🔥"),
        ("sparkles", "✨"),
        ("star", "⭐"),
        ("star2", "🌟"),
        ("dizzy", "💫"),
        ("boom", "💥"),
        ("collision", "💥"),
        ("zap", "⚡"),
        ("lightning", "⚡"),
        ("snowflake", "❄️"),
        ("cloud", "☁️"),
        ("sunny", "☀️"),
        ("rainbow", "🌈"),
        ("rocket", "🚀"),
        ("airplane", "✈️"),
        ("100", "💯"),
        ("check", "✅"),
        ("white_check_mark", "✅"),
        ("ballot_box_with_check", "☑️"),
        ("heavy_check_mark", "✔️"),
        ("x", "❌"),
        ("cross_mark", "❌"),
        ("negative_squared_cross_mark", "❎"),
        ("warning", "⚠️"),
        ("exclamation", "❗"),
        ("question", "❓"),
        ("grey_exclamation", "❕"),
        ("grey_question", "❔"),
        ("bangbang", "‼️"),
        ("interrobang", "⁉️"),
        ("bulb", "💡"),
        ("memo", "📝"),
        ("pencil", "✏️"),
        ("pencil2", "✏️"),
        ("pen", "🖊️"),
        ("lock", "🔒"),
        ("unlock", "🔓"),
        ("key", "🔑"),
        ("bell", "🔔"),
        ("no_bell", "🔕"),
        ("bookmark", "🔖"),
        ("link", "🔗"),
        ("paperclip", "📎"),
        ("pushpin", "📌"),
        ("scissors", "✂️"),
        ("file_folder", "📁"),
        ("open_file_folder", "📂"),
        ("page_facing_up", "📄"),
        ("page_with_curl", "📃"),
        ("calendar", "📅"),
        ("date", "📅"),
        ("clipboard", "📋"),
        ("chart_with_upwards_trend", "📈"),
        ("chart_with_downwards_trend", "📉"),
        ("bar_chart", "📊"),
        ("email", "📧"),
        ("envelope", "✉️"),
        ("inbox_tray", "📥"),
        ("outbox_tray", "📤"),
        ("package", "📦"),
        ("mailbox", "📫"),
        ("speech_balloon", "💬"),
        ("thought_balloon", "💭"),
        ("mag", "🔍"),
        ("mag_right", "🔎"),
        ("gear", "⚙️"),
        ("wrench", "🔧"),
        ("hammer", "🔨"),
        ("hammer_and_wrench", "🛠️"),
        ("tools", "🛠️"),
        ("nut_and_bolt", "🔩"),
        ("shield", "🛡️"),
        ("hourglass", "⌛"),
        ("hourglass_flowing_sand", "⏳"),
        ("watch", "⌚"),
        ("alarm_clock", "⏰"),
        ("stopwatch", "⏱️"),
        ("timer_clock", "⏲️"),
        // animals
        ("see_no_evil", "🙈"),
        ("hear_no_evil", "🙉"),
        ("speak_no_evil", "🙊"),
        ("monkey", "🐒"),
        ("monkey_face", "🐵"),
        ("dog", "🐕"),
        ("dog2", "🐕"),
        ("cat", "🐈"),
        ("cat2", "🐈"),
        ("tiger", "🐅"),
        ("tiger2", "🐅"),
        ("lion", "🦁"),
        ("horse", "🐴"),
        ("unicorn", "🦄"),
        ("cow", "🐄"),
        ("cow2", "🐄"),
        ("pig", "🐷"),
        ("pig2", "🐷"),
        ("chicken", "🐔"),
        ("penguin", "🐧"),
        ("bird", "🐦"),
        ("eagle", "🦅"),
        ("duck", "🦆"),
        ("owl", "🦉"),
        ("bat", "🦇"),
        ("wolf", "🐺"),
        ("fox_face", "🦊"),
        ("bear", "🐻"),
        ("panda_face", "🐼"),
        ("koala", "🐨"),
        ("rabbit", "🐰"),
        ("rabbit2", "🐇"),
        ("mouse", "🐭"),
        ("mouse2", "🐁"),
        ("rat", "🐀"),
        ("hamster", "🐹"),
        ("frog", "🐸"),
        ("snake", "🐍"),
        ("turtle", "🐢"),
        ("lizard", "🦎"),
        ("dragon", "🐉"),
        ("dragon_face", "🐲"),
        ("whale", "🐋"),
        ("whale2", "🐋"),
        ("dolphin", "🐬"),
        ("fish", "🐟"),
        ("tropical_fish", "🐠"),
        ("blowfish", "🐡"),
        ("shark", "🦈"),
        ("octopus", "🐙"),
        ("crab", "🦀"),
        ("lobster", "🦞"),
        ("shrimp", "🦐"),
        ("squid", "🦑"),
        ("snail", "🐌"),
        ("butterfly", "🦋"),
        ("bug", "🐛"),
        ("ant", "🐜"),
        ("bee", "🐝"),
        ("honeybee", "🐝"),
        ("spider", "🕷️"),
        ("spider_web", "🕸️"),
        // food & drink
        ("apple", "🍎"),
        ("green_apple", "🍏"),
        ("pear", "🍐"),
        ("tangerine", "🍊"),
        ("orange", "🍊"),
        ("lemon", "🍋"),
        ("banana", "🍌"),
        ("watermelon", "🍉"),
        ("grapes", "🍇"),
        ("strawberry", "🍓"),
        ("peach", "🍑"),
        ("cherries", "🍒"),
        ("pizza", "🍕"),
        ("hamburger", "🍔"),
        ("fries", "🍟"),
        ("hotdog", "🌭"),
        ("sandwich", "🥪"),
        ("taco", "🌮"),
        ("burrito", "🌯"),
        ("egg", "🥚"),
        ("cooking", "🍳"),
        ("cake", "🍰"),
        ("cookie", "🍪"),
        ("chocolate_bar", "🍫"),
        ("candy", "🍬"),
        ("lollipop", "🍭"),
        ("ice_cream", "🍨"),
        ("icecream", "🍦"),
        ("doughnut", "🍩"),
        ("coffee", "☕"),
        ("tea", "🍵"),
        ("beer", "🍺"),
        ("beers", "🍻"),
        ("wine_glass", "🍷"),
        ("cocktail", "🍸"),
        ("tropical_drink", "🍹"),
        ("champagne", "🍾"),
        // objects
        ("computer", "💻"),
        ("keyboard", "⌨️"),
        ("desktop_computer", "🖥️"),
        ("printer", "🖨️"),
        ("mouse_three_button", "🖱️"),
        ("trackball", "🖲️"),
        ("joystick", "🕹️"),
        ("video_game", "🎮"),
        ("phone", "📱"),
        ("iphone", "📱"),
        ("telephone", "☎️"),
        ("telephone_receiver", "📞"),
        ("battery", "🔋"),
        ("electric_plug", "🔌"),
        ("camera", "📷"),
        ("camera_flash", "📸"),
        ("video_camera", "📹"),
        ("movie_camera", "🎥"),
        ("film_projector", "📽️"),
        ("tv", "📺"),
        ("radio", "📻"),
        ("microphone", "🎤"),
        ("headphones", "🎧"),
        ("musical_note", "🎵"),
        ("notes", "🎶"),
        ("art", "🎨"),
        ("performing_arts", "🎭"),
        ("tickets", "🎟️"),
        ("clapper", "🎬"),
        ("books", "📚"),
        ("book", "📖"),
        ("notebook", "📓"),
        ("newspaper", "📰"),
        ("scroll", "📜"),
        ("moneybag", "💰"),
        ("dollar", "💵"),
        ("credit_card", "💳"),
        ("gem", "💎"),
        ("ring", "💍"),
        ("crown", "👑"),
        ("tophat", "🎩"),
        ("necktie", "👔"),
        ("shirt", "👕"),
        ("jeans", "👖"),
        ("dress", "👗"),
        ("lipstick", "💄"),
        ("kiss", "💋"),
        ("footprints", "👣"),
        // arrows
        ("arrow_up", "⬆️"),
        ("arrow_down", "⬇️"),
        ("arrow_left", "⬅️"),
        ("arrow_right", "➡️"),
        ("arrow_upper_left", "↖️"),
        ("arrow_upper_right", "↗️"),
        ("arrow_lower_left", "↙️"),
        ("arrow_lower_right", "↘️"),
        ("left_right_arrow", "↔️"),
        ("arrow_up_down", "↕️"),
        ("arrows_counterclockwise", "🔄"),
        ("arrows_clockwise", "🔃"),
        ("rewind", "⏪"),
        ("fast_forward", "⏩"),
        ("play_or_pause_button", "⏯️"),
        ("pause_button", "⏸️"),
        ("stop_button", "⏹️"),
        ("record_button", "⏺️"),
        // numbers
        ("zero", "0️⃣"),
        ("one", "1️⃣"),
        ("two", "2️⃣"),
        ("three", "3️⃣"),
        ("four", "4️⃣"),
        ("five", "5️⃣"),
        ("six", "6️⃣"),
        ("seven", "7️⃣"),
        ("eight", "8️⃣"),
        ("nine", "9️⃣"),
        ("keycap_ten", "🔟"),
    ]
    .into_iter()
    .collect();
}

/// Resolve a shortcode such as `+1` to its glyph. Unknown codes render as `:code:`.
pub fn shortcode_to_emoji(code: &str) -> String {
    match EMOJI.get(code) {
        Some(glyph) => (*glyph).to_owned(),
        None => format!(":{}:", code),
    }
}

/// Space separated glyphs, each followed by its count when above one.
pub fn format_reactions(reactions: &[CommentReaction]) -> String {
    reactions
        .iter()
        .map(|r| {
            let glyph = shortcode_to_emoji(&r.emoji);
            if r.count > 1 {
                format!("{}{}", glyph, r.count)
            } else {
                glyph
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reaction(emoji: &str, count: u32) -> CommentReaction {
        CommentReaction {
            emoji: emoji.to_owned(),
            count,
        }
    }

    #[test]
    fn test_known_shortcodes() {
        assert_eq!(shortcode_to_emoji("+1"), "\u{1f44d}");
        assert_eq!(shortcode_to_emoji("fire"), "\u{1f525}");
        assert_eq!(shortcode_to_emoji("heart"), "\u{2764}\u{fe0f}");
        assert_eq!(shortcode_to_emoji("100"), "\u{1f4af}");
    }

    #[test]
    fn test_unknown_shortcode() {
        assert_eq!(shortcode_to_emoji("not_a_real_emoji"), ":not_a_real_emoji:");
    }

    #[test]
    fn test_format_reactions() {
        assert_eq!(format_reactions(&[]), "");
        assert_eq!(
            format_reactions(&[
                reaction("+1", 3),
                reaction("eyes", 1),
                reaction("party_parrot", 2),
            ]),
            "\u{1f44d}3 \u{1f440} :party_parrot:2"
        );
    }
}
