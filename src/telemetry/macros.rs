/// Declares an operation marker module: the op type, its `Phase` enum and the span wiring.
///
/// ```ignore
/// op_marker!(init, Init, "init", [Plan => "plan", Migrate => "migrate"]);
/// ```
macro_rules! op_marker {
    ($module:ident, $op:ident, $name:literal, [$($phase:ident => $phase_name:literal),+ $(,)?]) => {
        pub mod $module {
            use tracing::{info_span, Span};

            use crate::telemetry::ctx::{OpMarker, PhaseSpan};

            #[derive(Copy, Clone, Debug)]
            pub struct $op;

            #[derive(Copy, Clone, Debug)]
            pub enum Phase { $($phase),+ }

            impl PhaseSpan for Phase {
                fn name(&self) -> &'static str { match self { $(Phase::$phase => $phase_name),+ } }
                fn span(&self) -> Span { match self { $(Phase::$phase => info_span!($phase_name)),+ } }
            }

            impl OpMarker for $op {
                const NAME: &'static str = $name;
                type Phase = Phase;
                fn root_span() -> Span { info_span!($name) }
            }
        }
    };
}

pub(crate) use op_marker;
