use crate::{context::WordClass, stage::Stage};

/// Trait that stages implement to opt into the universal test suite.
pub trait StageTestConfig: Stage + Sized {
    /// General test samples (may or may not trigger changes).
    fn samples(_class: WordClass) -> &'static [&'static str] {
        &["Hello World 123", " déjà-vu ", "TEST", "a b c", ""]
    }

    /// Samples that must pass through unchanged and unallocated.
    fn should_pass_through(_class: WordClass) -> &'static [&'static str] {
        &["hello", "world", "abc def", ""]
    }

    /// Input/output pairs that verify correct transformations.
    fn should_transform(_class: WordClass) -> &'static [(&'static str, &'static str)] {
        &[]
    }
}

/// Assert that a stage satisfies every universal stage contract:
///
/// 1. `zero_copy_when_no_changes` → no allocation when input == output
/// 2. `stage_is_idempotent` → applying twice yields same result as once
/// 3. `needs_apply_is_accurate` → predicts exactly whether `apply()` changes text
/// 4. `handles_empty_string` → empty in, empty out
/// 5. `no_panic_on_mixed_scripts` → survives pathological real-world input
#[macro_export]
macro_rules! assert_stage_contract {
    ($stage:expr) => {
        $crate::testing::stage_contract::zero_copy_when_no_changes($stage);
        $crate::testing::stage_contract::stage_is_idempotent($stage);
        $crate::testing::stage_contract::needs_apply_is_accurate($stage);
        $crate::testing::stage_contract::handles_empty_string($stage);
        $crate::testing::stage_contract::no_panic_on_mixed_scripts($stage);
    };
}

#[cfg(test)]
use crate::context::Context;
#[cfg(test)]
use std::borrow::Cow;

#[cfg(test)]
pub fn zero_copy_when_no_changes<S: StageTestConfig>(stage: S) {
    for &class in WordClass::ALL {
        let ctx = Context::new(class);

        for &input in S::samples(class) {
            let mut text = Cow::Borrowed(input);

            if !stage.needs_apply(&text, &ctx) {
                text = stage.apply(text, &ctx);
                assert_eq!(
                    input as *const str,
                    text.as_ref() as *const str,
                    "`{}` allocated although needs_apply() said no ({class:?}, `{input}`)",
                    stage.name()
                );
                continue;
            }
            text = stage.apply(text, &ctx);

            // Second pass must never allocate again
            let old_ptr = text.as_ref() as *const str;
            if stage.needs_apply(&text, &ctx) {
                text = stage.apply(text, &ctx);
            }
            assert_eq!(
                old_ptr,
                text.as_ref() as *const str,
                "zero-copy violated on second pass of `{}` ({class:?}, `{input}`)",
                stage.name()
            );
        }

        for &pass_through in S::should_pass_through(class) {
            assert!(
                !stage.needs_apply(pass_through, &ctx),
                "`{}` wants to touch pass-through sample `{pass_through}` ({class:?})",
                stage.name()
            );
            let text = stage.apply(Cow::Borrowed(pass_through), &ctx);
            assert!(
                matches!(text, Cow::Borrowed(s) if s.as_ptr() == pass_through.as_ptr()),
                "`{}` allocated for pass-through sample `{pass_through}` ({class:?})",
                stage.name()
            );
        }

        for &(input, expected) in S::should_transform(class) {
            let text = stage.apply(Cow::Borrowed(input), &ctx);
            assert_eq!(
                text.as_ref(),
                expected,
                "`{}` on `{input}` ({class:?})",
                stage.name()
            );
        }
    }
}

#[cfg(test)]
pub fn stage_is_idempotent<S: StageTestConfig>(stage: S) {
    for &class in WordClass::ALL {
        let ctx = Context::new(class);
        let inputs = S::samples(class)
            .iter()
            .chain(S::should_transform(class).iter().map(|(i, _)| i));
        for &input in inputs {
            let once = stage.apply(Cow::Borrowed(input), &ctx);
            let twice = stage.apply(once.clone(), &ctx);
            assert_eq!(
                once,
                twice,
                "`{}` not idempotent in {class:?} on `{input}`",
                stage.name()
            );
        }
    }
}

#[cfg(test)]
pub fn needs_apply_is_accurate<S: StageTestConfig>(stage: S) {
    for &class in WordClass::ALL {
        let ctx = Context::new(class);
        for &sample in S::samples(class) {
            check_accuracy(&stage, sample, &ctx);
        }
        for &(sample, _) in S::should_transform(class) {
            check_accuracy(&stage, sample, &ctx);
        }
        for &clean in S::should_pass_through(class) {
            check_accuracy(&stage, clean, &ctx);
        }
    }
}

#[cfg(test)]
fn check_accuracy<S: Stage>(stage: &S, input: &str, ctx: &Context) {
    let predicted = stage.needs_apply(input, ctx);
    // Owned input so stages that always rebuild are judged on content only
    let output = stage.apply(Cow::Owned(input.to_owned()), ctx);
    let actually_changes = output != input;
    assert_eq!(
        predicted,
        actually_changes,
        "needs_apply() mismatch for stage `{}` in {class:?} on `{input}`\n\
         predicted: {predicted}\n\
         actual   : {actually_changes} (output = {output:?})",
        stage.name(),
        class = ctx.word_class
    );
}

#[cfg(test)]
pub fn handles_empty_string<S: StageTestConfig>(stage: S) {
    for &class in WordClass::ALL {
        let ctx = Context::new(class);
        assert!(!stage.needs_apply("", &ctx));
        assert_eq!(stage.apply(Cow::Borrowed(""), &ctx), "");
    }
}

#[cfg(test)]
pub fn no_panic_on_mixed_scripts<S: StageTestConfig>(stage: S) {
    for &class in WordClass::ALL {
        let ctx = Context::new(class);
        let _ = stage.apply(
            Cow::Borrowed("Hello 世界 русский Türkçe العربية 简体中文 <b>x</b> &amp; 42"),
            &ctx,
        );
    }
}
