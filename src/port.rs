// ABOUTME: Input/output port state backing the InPort and OutPort value variants

use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::rc::Rc;

pub enum Stream {
    Stdout,
    Stdin,
    OutFile(File),
    InFile(BufReader<File>),
}

pub struct PortState {
    pub name: String,
    pub closed: bool,
    pub stream: Stream,
}

pub type Port = Rc<RefCell<PortState>>;

pub fn stdout_port() -> Port {
    Rc::new(RefCell::new(PortState {
        name: "stdout".to_string(),
        closed: false,
        stream: Stream::Stdout,
    }))
}

pub fn open_output(path: &str) -> std::io::Result<Port> {
    let file = File::create(path)?;
    Ok(Rc::new(RefCell::new(PortState {
        name: path.to_string(),
        closed: false,
        stream: Stream::OutFile(file),
    })))
}

pub fn open_input(path: &str) -> std::io::Result<Port> {
    let file = File::open(path)?;
    Ok(Rc::new(RefCell::new(PortState {
        name: path.to_string(),
        closed: false,
        stream: Stream::InFile(BufReader::new(file)),
    })))
}

pub fn write_str(port: &Port, text: &str) -> std::io::Result<()> {
    let mut state = port.borrow_mut();
    if state.closed {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "port is closed",
        ));
    }
    match &mut state.stream {
        Stream::Stdout => {
            print!("{text}");
            std::io::stdout().flush()
        }
        Stream::OutFile(f) => f.write_all(text.as_bytes()),
        Stream::Stdin | Stream::InFile(_) => Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "not an output port",
        )),
    }
}

pub fn read_to_string(port: &Port) -> std::io::Result<String> {
    let mut state = port.borrow_mut();
    if state.closed {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "port is closed",
        ));
    }
    match &mut state.stream {
        Stream::InFile(r) => {
            let mut buf = String::new();
            r.read_to_string(&mut buf)?;
            Ok(buf)
        }
        Stream::Stdin => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Stream::Stdout | Stream::OutFile(_) => Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "not an input port",
        )),
    }
}

pub fn close(port: &Port) {
    port.borrow_mut().closed = true;
}
