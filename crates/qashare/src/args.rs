use std::collections::BTreeSet;

use crate::{SessionUser, ShareOptions, ShareOrigin};
use tracing::error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

pub struct ShareArgs {
    pub origin: Option<ShareOrigin>,
    pub locale: Option<LanguageIdentifier>,
    pub user: Option<SessionUser>,
    pub title: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub options: ShareOptions,
    pub datapath: Option<String>,
}

impl ShareArgs {
    // parse arguments, return set of unrecognized args
    pub fn parse(args: &[String]) -> (Self, BTreeSet<String>) {
        let mut unrecognized_args = BTreeSet::new();
        let mut res = ShareArgs {
            origin: None,
            locale: None,
            user: None,
            title: None,
            question: None,
            answer: None,
            options: ShareOptions::default(),
            datapath: None,
        };

        let mut i = 0;
        let len = args.len();
        while i < len {
            let arg = &args[i];

            if arg == "--mobile" {
                res.options.set(ShareOptions::Mobile, true);
            } else if arg == "--light" {
                res.options.set(ShareOptions::LightTheme, true);
            } else if arg == "--dark" {
                res.options.set(ShareOptions::LightTheme, false);
            } else if arg == "--debug" {
                res.options.set(ShareOptions::Debug, true);
            } else if arg == "--native-share" {
                res.options.set(ShareOptions::NativeShare, true);
            } else if arg == "--locale" {
                i += 1;
                let Some(locale) = args.get(i) else {
                    error!("locale argument missing?");
                    continue;
                };
                let parsed: Result<LanguageIdentifier, LanguageIdentifierError> = locale.parse();
                match parsed {
                    Err(err) => {
                        error!("locale failed to parse: {err}");
                    }
                    Ok(locale) => {
                        tracing::info!(
                            "parsed locale '{locale}' from args, not sure if we have it yet though."
                        );
                        res.locale = Some(locale);
                    }
                }
            } else if arg == "--origin" {
                i += 1;
                let Some(origin) = args.get(i) else {
                    error!("origin argument missing?");
                    continue;
                };
                match ShareOrigin::parse(origin) {
                    Ok(origin) => res.origin = Some(origin),
                    Err(err) => error!("{err}"),
                }
            } else if arg == "--user" {
                let (Some(id), Some(username)) = (args.get(i + 1), args.get(i + 2)) else {
                    error!("--user needs an id and a username");
                    i += 1;
                    continue;
                };
                res.user = Some(SessionUser::new(id.clone(), username.clone()));
                i += 2;
            } else if arg == "--title" {
                i += 1;
                let Some(title) = args.get(i) else {
                    error!("title argument missing?");
                    continue;
                };
                res.title = Some(title.clone());
            } else if arg == "--question" {
                i += 1;
                let Some(qid) = args.get(i) else {
                    error!("question argument missing?");
                    continue;
                };
                res.question = Some(qid.clone());
            } else if arg == "--answer" {
                i += 1;
                let Some(aid) = args.get(i) else {
                    error!("answer argument missing?");
                    continue;
                };
                res.answer = Some(aid.clone());
            } else if arg == "--datapath" {
                i += 1;
                let Some(path) = args.get(i) else {
                    error!("datapath argument missing?");
                    continue;
                };
                res.datapath = Some(path.clone());
            } else {
                unrecognized_args.insert(arg.clone());
            }

            i += 1;
        }

        (res, unrecognized_args)
    }
}
