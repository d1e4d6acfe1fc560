use rterm_vte::{Actor, Parser};

#[derive(Default)]
struct MyActor;

impl Actor for MyActor {
    fn print(&mut self, byte: u8) {
        println!("print: {byte:#04x}");
    }

    fn execute(&mut self, byte: u8) {
        println!("exec: {byte:#04x}");
    }

    fn hook(&mut self, params: &[i64], intermediates: &[u8], ignored: bool) {
        println!("DCS hook: params={params:?} intermediates={intermediates:?} ignored={ignored}");
    }

    fn put(&mut self, byte: u8) {
        println!("DCS put: {byte:#04x}");
    }

    fn unhook(&mut self) {
        println!("DCS unhook");
    }

    fn osc_dispatch(&mut self, params: &[&[u8]]) {
        println!("OSC: {params:?}");
    }

    fn csi_dispatch(&mut self, params: &[i64], intermediates: &[u8], ignored: bool, byte: u8) {
        println!(
            "CSI: params={params:?} intermediates={intermediates:?} ignored={ignored} final={byte:#04x}"
        );
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], ignored: bool, byte: u8) {
        println!("ESC: intermediates={intermediates:?} ignored={ignored} final={byte:#04x}");
    }
}

fn main() {
    let mut parser = Parser::new();
    let mut actor = MyActor::default();
    parser.advance_all(&mut actor, b"\x1b[31mhi\x1b[0m");
}
