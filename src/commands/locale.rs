use crate::LocaleArgs;
use crate::i18n::{detect_locale, localize_path};

pub fn run(args: &LocaleArgs) {
    let locale = detect_locale(
        args.stored.as_deref(),
        args.param.as_deref(),
        &args.languages,
    );
    tracing::debug!(
        stored = ?args.stored,
        param = ?args.param,
        languages = ?args.languages,
        %locale,
        "detected locale"
    );

    println!("{locale}");
    if let Some(path) = &args.path {
        println!("{}", localize_path(path, locale));
    }
}
