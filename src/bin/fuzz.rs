#[macro_use]
extern crate afl;

fn main() {
    fuzz!(|data: &[u8]| {
        if let Ok(line) = std::str::from_utf8(data) {
            // any input must come back as a value or an error, never a panic
            let _ = shunting_calc::evaluate(line);
            let _ = shunting_calc::evaluate_rpn(line);
        }
    });
}
