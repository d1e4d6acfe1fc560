use rterm_surface::Screen;

fn main() {
    let mut screen = Screen::new(80, 24);
    for byte in b"Hello, screen!" {
        screen.putch(*byte as u32);
    }
    for x in 0..14 {
        let cell = screen.cell(x, 0);
        print!("{}", char::from_u32(cell.code_point).unwrap_or(' '));
    }
    println!();
}
