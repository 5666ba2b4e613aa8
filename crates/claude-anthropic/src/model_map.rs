use std::borrow::Cow;

use claude_core::model::Model;

pub(crate) fn map_model(model: &Model) -> Cow<'_, str> {
    match model {
        Model::Anthropic(known) => Cow::Borrowed(known.as_str()),
        Model::Custom(custom) => Cow::Borrowed(custom.as_str()),
    }
}
