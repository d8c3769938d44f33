//! Prints a couple of products computed with `samples::multiply`.

use admonition_filter::samples::multiply;

fn main() {
    for (a, b) in [(2, 3), (4, 5)] {
        match multiply(a, b) {
            Some(product) => println!("{} x {} = {}", a, b, product),
            None => {
                eprintln!("{} x {} overflows", a, b);
                std::process::exit(1);
            }
        }
    }
}
