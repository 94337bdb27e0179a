use anyhow::Result;

pub trait Request {
    type Resp;
}

pub trait Queryable<Req>
where
    Req: Request,
{
    fn query(&self, req: Req) -> Result<Req::Resp>;
}

/// Requests that change state take the service exclusively.
pub trait Commandable<Req>
where
    Req: Request,
{
    fn execute(&mut self, req: Req) -> Result<Req::Resp>;
}
