//! Macros for declaring transition tables.

/// Declare a [`TransitionTable`](crate::core::TransitionTable) inline.
///
/// Phases not listed on the left are terminal. The entry clause is
/// optional and defaults to `Research`.
///
/// # Example
///
/// ```
/// use globex_phases::transition_table;
/// use globex_phases::core::Phase;
///
/// let table = transition_table! {
///     entry: Research;
///     Research => [Interview],
///     Interview => [Plan, Research],
///     Plan => [],
/// };
///
/// assert!(table.is_valid_transition(Phase::Interview, Phase::Research));
/// assert!(table.is_terminal(Phase::Plan));
/// ```
#[macro_export]
macro_rules! transition_table {
    (@edges $builder:expr; $($from:ident => [$($to:ident),*]),*) => {{
        let builder = $builder;
        $(
            let builder = builder.allow_any($crate::core::Phase::$from, {
                let targets: &[$crate::core::Phase] = &[$($crate::core::Phase::$to),*];
                targets.iter().copied()
            });
        )*
        builder.build()
    }};
    (
        entry: $entry:ident;
        $($from:ident => [$($to:ident),* $(,)?]),* $(,)?
    ) => {
        $crate::transition_table!(
            @edges $crate::builder::TransitionTableBuilder::new().entry($crate::core::Phase::$entry);
            $($from => [$($to),*]),*
        )
    };
    (
        $($from:ident => [$($to:ident),* $(,)?]),* $(,)?
    ) => {
        $crate::transition_table!(
            @edges $crate::builder::TransitionTableBuilder::new();
            $($from => [$($to),*]),*
        )
    };
}
